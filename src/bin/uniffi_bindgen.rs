//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Produces Swift and Kotlin wrappers around `FfiRecipeBrowser` so mobile
//! hosts can drive the recipe browser directly.
//!
//! ## Usage
//!
//! ```bash
//! cargo build --release
//! cargo run --features cli --bin uniffi-bindgen generate \
//!     --library target/release/librecipe_browser.so --language swift --out-dir ./bindings
//! ```
//!
//! Replace `swift` with `kotlin` for Android.

fn main() {
    uniffi::uniffi_bindgen_main()
}
