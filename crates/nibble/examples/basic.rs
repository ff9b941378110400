//! Shuffle one word with both kernels and print the results in hex.
//!
//! ```text
//! cargo run -p nibble --example basic [SRC] [IDX]
//! ```

use nibble::U4x16;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let mut args = std::env::args().skip(1);
  let src: U4x16 = args.next().as_deref().unwrap_or("0x9E3779B97F4A7C15").parse()?;
  let idx: U4x16 = args.next().as_deref().unwrap_or("0xB74E05C2FD83169A").parse()?;

  let serial = src.shuffle_reference(idx);
  let vector = src.shuffle(idx);

  println!("src:    {src}");
  println!("idx:    {idx}");
  println!("serial: {serial}");
  println!("vector: {vector} ({})", nibble::selected_backend());

  if serial != vector {
    return Err(format!("kernel mismatch: serial {serial} != vector {vector}").into());
  }
  Ok(())
}
