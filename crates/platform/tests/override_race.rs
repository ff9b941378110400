//! An override racing the first `get()` either wins or is rejected, never
//! silently dropped. Own binary: the detection cache is process-global.

#![cfg(not(miri))]

use platform::{Caps, Detected, OverrideError};

#[test]
fn override_racing_first_detection_is_never_lost() {
  let reader = std::thread::spawn(platform::get);
  let result = platform::try_set_override(Some(Detected::portable()));
  let seen = reader.join().expect("detection thread panicked");

  match result {
    Ok(()) => {
      assert_eq!(platform::get().caps, Caps::NONE, "accepted override must be in effect");
      assert_eq!(seen.caps, Caps::NONE);
    }
    Err(err) => {
      assert_eq!(err, OverrideError::AlreadyInitialized);
      assert_eq!(platform::get(), seen);
    }
  }

  assert_eq!(platform::try_set_override(None), Err(OverrideError::AlreadyInitialized));
}
