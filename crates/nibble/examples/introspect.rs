//! Print shuffle kernel selection diagnostics.
//!
//! ```text
//! NIBBLE_SHUFFLE_FORCE=portable cargo run -p nibble --features diag --example introspect
//! ```

fn main() {
  let diag = nibble::diag::selection_diag();
  println!("arch:            {}", diag.arch);
  println!("caps:            {}", diag.caps);
  println!("requested force: {}", diag.requested_force.as_str());
  println!("effective force: {}", diag.effective_force.as_str());
  println!("simd available:  {}", diag.has_simd);
  println!("override:        {}", diag.has_override);
  println!("kernel:          {} ({})", diag.selected_kernel, diag.tier);
  println!("available:       {}", nibble::bench::available_kernels().join(", "));
}
