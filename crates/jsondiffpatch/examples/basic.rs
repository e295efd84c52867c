//! Walk-through of the three core operations, over both the typed and the
//! string APIs.

use jsondiffpatch::{diff, diff_str, patch, patch_str, unpatch, unpatch_str};
use serde_json::json;

fn main() {
    println!("=== Typed API ===");

    let left = json!({"x": 1, "y": 2});
    let right = json!({"x": 1, "y": 3, "z": 4});

    let delta = diff(&left, &right);
    println!("Original:  {left}");
    println!("Modified:  {right}");
    println!("Delta:     {delta}");

    let patched = patch(&left, &delta).expect("delta came from diff");
    println!("Patched:   {patched}");

    let unpatched = unpatch(&right, &delta).expect("delta came from diff");
    println!("Unpatched: {unpatched}");

    println!();
    println!("=== String API ===");

    let a = r#"{"name":"John","age":30}"#;
    let b = r#"{"name":"John","age":31,"city":"New York"}"#;

    let delta = diff_str(a, b);
    println!("JSON A:    {a}");
    println!("JSON B:    {b}");
    println!("Delta:     {delta}");
    println!("Patched:   {}", patch_str(a, &delta));
    println!("Unpatched: {}", unpatch_str(b, &delta));
}
