fn main() {
    // Window list and cursor queries go through CoreGraphics directly
    println!("cargo:rustc-link-lib=framework=CoreGraphics");
    println!("cargo:rustc-link-lib=framework=AppKit");

    tauri_build::build();
}
