use crate::{DecodingError, EncodingError, Format, ProbeFailure, probe};

/// Strategy-agnostic way to turn a `T` into bytes and back.
///
/// Every strategy is a self-contained implementation of this trait. Bytes
/// produced by one strategy are only meaningful to the same strategy and the
/// same `T`; feeding them anywhere else is unspecified.
pub trait Codec<T> {
    /// The strategy behind this codec.
    const FORMAT: Format;

    /// Serializes `value` into a fresh byte vector.
    ///
    /// Takes `&mut self` because the codec reuses an internal buffer.
    fn encode(&mut self, value: &T) -> Result<Vec<u8>, EncodingError>;

    /// Reconstructs a value from bytes previously produced by [`Codec::encode`].
    fn decode(&self, bytes: &[u8]) -> Result<T, DecodingError>;

    /// Round-trips a synthetic default instance of `T` and reports why it
    /// failed, if it did.
    ///
    /// See [`probe::run`] for how the instance is built.
    fn probe(&mut self) -> Result<(), ProbeFailure>
    where
        T: Default + 'static,
    {
        probe::run::<T, Self>(self)
    }

    /// Whether this strategy can round-trip `T` at all.
    ///
    /// Advisory: a `true` only covers the synthetic instance, not every value.
    /// Panics are reported as `false` but still reach the panic hook.
    fn probe_support(&mut self) -> bool
    where
        T: Default + 'static,
    {
        self.probe().is_ok()
    }
}
