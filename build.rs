use std::env;

fn main() {
    // Version string shown by `traffic-manager --version`
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string());
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile == "release" {
        println!("cargo:rustc-env=TRAFFIC_MANAGER_VERSION={version}");
    } else {
        println!("cargo:rustc-env=TRAFFIC_MANAGER_VERSION={version}-{profile}");
    }

    println!("cargo:rerun-if-changed=src/");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
