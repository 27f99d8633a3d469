use std::env;

const OVERRIDE: &str = "INTRUSIVE_RING_DIAGNOSTICS";

fn main() {
    println!("cargo::rustc-check-cfg=cfg(diagnostics)");
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-env-changed={OVERRIDE}");

    let enabled = match env::var(OVERRIDE).as_deref() {
        Ok("on" | "1" | "true") => true,
        Ok("off" | "0" | "false") => false,
        Ok(other) => panic!("{OVERRIDE} must be `on` or `off`, got `{other}`"),
        Err(_) => {
            env::var_os("CARGO_FEATURE_DIAGNOSTICS").is_some()
                || env::var_os("CARGO_CFG_DEBUG_ASSERTIONS").is_some()
        }
    };

    if enabled {
        println!("cargo::rustc-cfg=diagnostics");
    }
}
