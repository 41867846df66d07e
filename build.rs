#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // Embed the icon only when it ships with the sources
    if !std::path::Path::new("res/rmemo.ico").exists() {
        return;
    }

    let mut res = WindowsResource::new();
    res.set_icon("res/rmemo.ico")
        .set("FileDescription", "rMemo CLI")
        .set("ProductName", "rMemo")
        .set("OriginalFilename", "rmemo.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
