//! Sealing for traits that are public but only meant to be implemented by
//! the consumers of this crate.

/// Returned by the hidden method of sealed traits.
#[allow(missing_debug_implementations)]
pub struct PrivateMarker;

#[doc(hidden)]
#[macro_export]
macro_rules! private_impl {
    () => {
        fn __futures_sequencer_private__(&self) -> $crate::private::PrivateMarker {
            $crate::private::PrivateMarker
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! private_decl {
    () => {
        /// This trait is private; this method exists to make it
        /// impossible to implement outside the crate.
        #[doc(hidden)]
        fn __futures_sequencer_private__(&self) -> $crate::private::PrivateMarker;
    };
}
