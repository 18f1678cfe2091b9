#![forbid(unsafe_code)]
//! Browser entry for the FileDeck web client.

#[cfg(target_arch = "wasm32")]
fn main() {
    filedeck_ui::run_app();
}

/// Shown when the binary is started outside a browser.
#[cfg(not(target_arch = "wasm32"))]
const NATIVE_HINT: &str = "filedeck-ui only runs in the browser. \
Serve it with `trunk serve` from crates/filedeck-ui, or use the `filedeck` CLI.";

#[cfg(not(target_arch = "wasm32"))]
fn write_native_hint(out: &mut impl std::io::Write) -> std::io::Result<()> {
    writeln!(out, "{NATIVE_HINT}")
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    write_native_hint(&mut std::io::stderr().lock())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_hint_points_at_trunk_and_cli() {
        let mut out = Vec::new();
        write_native_hint(&mut out).expect("write to buffer");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("trunk serve"));
        assert!(text.contains("`filedeck` CLI"));
        assert!(text.ends_with('\n'));
    }
}
