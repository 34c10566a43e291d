// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bastion_buffer::SecureBuffer;
use subtle::ConstantTimeEq;

use crate::ccm::CcmBackend;
use crate::error::{AeadError, BackendError};
use crate::gcm::{GCM_MAX_TAG_LEN, GcmBackend};
use crate::mode::AeadMode;
use crate::traits::ModeBackend;

/// Default tag length for CCM sessions.
pub const DEFAULT_TAG_LEN: usize = 16;

enum CipherContext {
    Stream(GcmBackend),
    Counter(CcmBackend),
}

/// Static dispatch over the backend variants.
macro_rules! dispatch {
    ($context:expr, $backend:ident => $call:expr) => {
        match $context {
            CipherContext::Stream($backend) => $call,
            CipherContext::Counter($backend) => $call,
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    Constructed,
    Reset,
    Transforming,
    TagExtracted,
    Faulted,
}

/// One AEAD session over AES-GCM or AES-CCM.
///
/// Usage follows `reset → aad* → (encrypt | decrypt)* → auth_tag`, and a
/// session may be reset any number of times. Re-resetting mid-message simply
/// abandons the previous message.
///
/// The type is move-only: a live session cannot be duplicated.
///
/// # Example
///
/// ```rust
/// use bastion_aead::{AeadCipher, AeadMode};
///
/// let mut cipher = AeadCipher::new(AeadMode::Gcm, b"use a 16 b key!!").expect("Failed to create cipher");
///
/// let mut data = *b"attack at dawn";
/// cipher.reset(b"the nonce!!!", b"header").expect("Failed to reset()");
/// cipher.encrypt_in_place(&mut data, 14).expect("Failed to encrypt()");
///
/// let mut tag = [0u8; 16];
/// cipher.auth_tag(&mut tag).expect("Failed to auth_tag()");
///
/// cipher.reset(b"the nonce!!!", b"header").expect("Failed to reset()");
/// cipher.decrypt_in_place(&mut data, 14).expect("Failed to decrypt()");
/// cipher.verify_tag(&tag).expect("Tag mismatch");
///
/// assert_eq!(&data, b"attack at dawn");
/// ```
pub struct AeadCipher {
    mode: AeadMode,
    tag_len: usize,
    context: CipherContext,
    phase: SessionPhase,
}

impl AeadCipher {
    /// Creates a session. CCM sessions use [`DEFAULT_TAG_LEN`].
    ///
    /// # Errors
    ///
    /// [`AeadError::InvalidKeyLength`] unless `key` is 16, 24 or 32 bytes.
    pub fn new(mode: AeadMode, key: &[u8]) -> Result<Self, AeadError> {
        Self::with_tag_len(mode, key, DEFAULT_TAG_LEN)
    }

    /// Creates a session with an explicit CCM tag length.
    ///
    /// `tag_len` must be one of 4, 6, 8, 10, 12, 14 or 16 for CCM and is
    /// ignored for GCM, whose tag length is chosen per `auth_tag` call.
    pub fn with_tag_len(mode: AeadMode, key: &[u8], tag_len: usize) -> Result<Self, AeadError> {
        if !matches!(key.len(), 16 | 24 | 32) {
            return Err(AeadError::InvalidKeyLength { len: key.len() });
        }

        let (context, tag_len) = match mode {
            AeadMode::Gcm => (
                CipherContext::Stream(GcmBackend::new(key).map_err(init_error("new"))?),
                GCM_MAX_TAG_LEN,
            ),
            AeadMode::Ccm => {
                let backend = CcmBackend::new(key, tag_len).map_err(|source| match source {
                    BackendError::InvalidTagLength { len } => AeadError::InvalidTagLength { len },
                    source => init_error("new")(source),
                })?;

                (CipherContext::Counter(backend), tag_len)
            }
        };

        Ok(Self {
            mode,
            tag_len,
            context,
            phase: SessionPhase::Constructed,
        })
    }

    /// Mode of this session.
    pub fn mode(&self) -> AeadMode {
        self.mode
    }

    /// Tag length: fixed for CCM, the maximum (16) for GCM.
    pub fn tag_len(&self) -> usize {
        self.tag_len
    }

    /// Algorithm name, e.g. `"AES-128-GCM"`.
    pub fn algorithm(&self) -> &'static str {
        dispatch!(&self.context, backend => backend.name())
    }

    /// Starts a new message.
    ///
    /// GCM accepts any non-empty nonce (12 bytes takes the fast path). CCM
    /// requires 8 to 12 bytes and takes its full associated data here.
    ///
    /// # Errors
    ///
    /// [`AeadError::Initialization`] if the backend rejects the nonce. The
    /// session then stays unusable until a successful reset.
    pub fn reset(&mut self, nonce: &[u8], aad: &[u8]) -> Result<(), AeadError> {
        tracing::trace!(mode = %self.mode, nonce_len = nonce.len(), aad_len = aad.len(), "aead session reset");

        let mode = self.mode;
        let result = dispatch!(&mut self.context, backend => start_message(backend, mode, nonce, aad));

        match result {
            Ok(()) => {
                self.phase = SessionPhase::Reset;
                Ok(())
            }
            Err(source) => {
                self.phase = SessionPhase::Faulted;
                Err(init_error("reset")(source))
            }
        }
    }

    /// Appends associated data (GCM only, before the first transform).
    ///
    /// # Errors
    ///
    /// - [`AeadError::Unsupported`] on CCM sessions
    /// - [`AeadError::NotReset`] before the first reset
    /// - [`AeadError::AadAfterMessage`] once a transform happened
    pub fn aad(&mut self, data: &[u8]) -> Result<(), AeadError> {
        if self.mode == AeadMode::Ccm {
            return Err(AeadError::Unsupported {
                operation: "aad",
                mode: self.mode,
            });
        }

        match self.phase {
            SessionPhase::Constructed => return Err(AeadError::NotReset),
            SessionPhase::Faulted => return Err(AeadError::Faulted),
            SessionPhase::Transforming | SessionPhase::TagExtracted => {
                return Err(AeadError::AadAfterMessage);
            }
            SessionPhase::Reset => {}
        }

        if data.is_empty() {
            return Ok(());
        }

        dispatch!(&mut self.context, backend => backend.process_aad(data)).map_err(|source| {
            AeadError::Backend {
                operation: "aad",
                source,
            }
        })
    }

    fn check_transform(&self, len: usize, capacity: usize) -> Result<(), AeadError> {
        match self.phase {
            SessionPhase::Constructed => return Err(AeadError::NotReset),
            SessionPhase::Faulted => return Err(AeadError::Faulted),
            SessionPhase::TagExtracted => return Err(AeadError::TagExtracted),
            SessionPhase::Reset | SessionPhase::Transforming => {}
        }

        if len == 0 {
            return Err(AeadError::EmptyInput);
        }

        if capacity < len {
            return Err(AeadError::InsufficientCapacity { len, capacity });
        }

        Ok(())
    }

    fn transform(&mut self, buf: &mut [u8], encrypt: bool) -> Result<(), AeadError> {
        let (operation, result) = if encrypt {
            ("encrypt", dispatch!(&mut self.context, backend => backend.encrypt_in_place(buf)))
        } else {
            ("decrypt", dispatch!(&mut self.context, backend => backend.decrypt_in_place(buf)))
        };

        match result {
            Ok(()) => {
                self.phase = SessionPhase::Transforming;
                Ok(())
            }
            Err(source) => {
                self.phase = SessionPhase::Faulted;
                Err(AeadError::Backend { operation, source })
            }
        }
    }

    /// Encrypts `input` into `output[..input.len()]`.
    ///
    /// Spare output capacity is left untouched. May be called repeatedly to
    /// stream one message.
    pub fn encrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), AeadError> {
        self.check_transform(input.len(), output.len())?;

        let out = &mut output[..input.len()];
        out.copy_from_slice(input);
        self.transform(out, true)
    }

    /// Decrypts `input` into `output[..input.len()]`.
    pub fn decrypt(&mut self, input: &[u8], output: &mut [u8]) -> Result<(), AeadError> {
        self.check_transform(input.len(), output.len())?;

        let out = &mut output[..input.len()];
        out.copy_from_slice(input);
        self.transform(out, false)
    }

    /// Encrypts `buf[..len]` in place; `buf.len()` is the capacity.
    pub fn encrypt_in_place(&mut self, buf: &mut [u8], len: usize) -> Result<(), AeadError> {
        self.check_transform(len, buf.len())?;
        self.transform(&mut buf[..len], true)
    }

    /// Decrypts `buf[..len]` in place; `buf.len()` is the capacity.
    pub fn decrypt_in_place(&mut self, buf: &mut [u8], len: usize) -> Result<(), AeadError> {
        self.check_transform(len, buf.len())?;
        self.transform(&mut buf[..len], false)
    }

    /// Writes the authentication tag into `tag_out`.
    ///
    /// `tag_out` is zero-filled first. GCM accepts 1 to 16 bytes; CCM requires
    /// exactly [`tag_len`](Self::tag_len). Repeated calls return the same tag
    /// until the next reset.
    pub fn auth_tag(&mut self, tag_out: &mut [u8]) -> Result<(), AeadError> {
        tag_out.fill(0);

        match self.phase {
            SessionPhase::Constructed => return Err(AeadError::NotReset),
            SessionPhase::Faulted => return Err(AeadError::Faulted),
            _ => {}
        }

        let valid_len = match self.mode {
            AeadMode::Gcm => (1..=GCM_MAX_TAG_LEN).contains(&tag_out.len()),
            AeadMode::Ccm => tag_out.len() == self.tag_len,
        };

        if !valid_len {
            return Err(AeadError::InvalidTagLength { len: tag_out.len() });
        }

        match dispatch!(&mut self.context, backend => backend.get_tag(tag_out)) {
            Ok(()) => {
                self.phase = SessionPhase::TagExtracted;
                Ok(())
            }
            Err(source) => {
                tag_out.fill(0);
                self.phase = SessionPhase::Faulted;
                Err(AeadError::Backend {
                    operation: "auth_tag",
                    source,
                })
            }
        }
    }

    /// Computes the tag and compares it with `expected` in constant time.
    ///
    /// # Errors
    ///
    /// [`AeadError::AuthenticationFailed`] on mismatch, or any error of
    /// [`auth_tag`](Self::auth_tag).
    pub fn verify_tag(&mut self, expected: &[u8]) -> Result<(), AeadError> {
        let mut computed = SecureBuffer::with_capacity(expected.len());
        computed.resize(expected.len());

        self.auth_tag(&mut computed)?;

        if bool::from(computed.as_slice().ct_eq(expected)) {
            Ok(())
        } else {
            Err(AeadError::AuthenticationFailed)
        }
    }
}

impl core::fmt::Debug for AeadCipher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AeadCipher")
            .field("algorithm", &self.algorithm())
            .field("tag_len", &self.tag_len)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

fn start_message<B: ModeBackend>(
    backend: &mut B,
    mode: AeadMode,
    nonce: &[u8],
    aad: &[u8],
) -> Result<(), BackendError> {
    backend.reset_iv(nonce)?;

    // CCM always takes its (possibly empty) associated data at reset.
    if mode == AeadMode::Ccm || !aad.is_empty() {
        backend.process_aad(aad)?;
    }

    Ok(())
}

fn init_error(operation: &'static str) -> impl Fn(BackendError) -> AeadError {
    move |source| AeadError::Initialization { operation, source }
}
