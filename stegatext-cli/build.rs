#[cfg(windows)]
extern crate winres;

fn main() {
    #[cfg(windows)]
    windows_only();
}

#[cfg(windows)]
fn windows_only() {
    let mut res = winres::WindowsResource::new();
    res.set("ProductName", "StegaText");
    res.set("FileDescription", "A CLI for StegaText.");
    res.compile().unwrap();
}
