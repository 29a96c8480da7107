use std::{
    any::{self, Any},
    panic::{self, AssertUnwindSafe},
};

use log::debug;
use thiserror::Error;

use crate::{Codec, DecodingError, EncodingError};

/// Stand-in for `String::default()` during a probe. Some strategies treat
/// empty text specially, so the probe never feeds them one.
pub const TEXT_PLACEHOLDER: &str = "probe";

/// Why a probe reported no support.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    #[error("Default construction panicked")]
    Construction,
    #[error("Encoding failed: {0}")]
    Encoding(#[source] EncodingError),
    #[error("Encoding produced no bytes")]
    EmptyEncoding,
    #[error("Decoding failed: {0}")]
    Decoding(#[source] DecodingError),
    #[error("Strategy panicked during {stage}")]
    Panicked { stage: &'static str },
}

/// Builds the synthetic instance a probe round-trips: `T::default()`, except
/// for `String` which gets [`TEXT_PLACEHOLDER`].
pub fn sample<T>() -> T
where
    T: Default + 'static,
{
    let mut value = T::default();
    if let Some(text) = (&mut value as &mut dyn Any).downcast_mut::<String>() {
        *text = TEXT_PLACEHOLDER.to_owned();
    }
    value
}

/// Encodes and decodes [`sample`] through `codec`, turning every failure
/// (including panics) into a [`ProbeFailure`].
///
/// This is the only place in the crate where errors are caught instead of
/// propagated.
///
/// Caught panics still pass through the global panic hook, so each one is
/// printed to stderr. Callers probing types they expect to panic may want to
/// install a quieter hook with [`std::panic::set_hook`] first.
pub fn run<T, C>(codec: &mut C) -> Result<(), ProbeFailure>
where
    T: Default + 'static,
    C: Codec<T> + ?Sized,
{
    let type_name = any::type_name::<T>();

    match attempt::<T, C>(codec) {
        Ok(len) => {
            debug!("{}: probe for {type_name} passed ({len} bytes)", C::FORMAT);
            Ok(())
        }
        Err(failure) => {
            debug!("{}: probe for {type_name} failed: {failure}", C::FORMAT);
            Err(failure)
        }
    }
}

fn attempt<T, C>(codec: &mut C) -> Result<usize, ProbeFailure>
where
    T: Default + 'static,
    C: Codec<T> + ?Sized,
{
    let value = panic::catch_unwind(sample::<T>).map_err(|_| ProbeFailure::Construction)?;

    let bytes = panic::catch_unwind(AssertUnwindSafe(|| codec.encode(&value)))
        .map_err(|_| ProbeFailure::Panicked { stage: "encode" })?
        .map_err(ProbeFailure::Encoding)?;

    if bytes.is_empty() {
        return Err(ProbeFailure::EmptyEncoding);
    }

    panic::catch_unwind(AssertUnwindSafe(|| codec.decode(&bytes).map(drop)))
        .map_err(|_| ProbeFailure::Panicked { stage: "decode" })?
        .map_err(ProbeFailure::Decoding)?;

    Ok(bytes.len())
}
