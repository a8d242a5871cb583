//! Transaction confirmation and authorization
//!
//! The coordinator drives the confirm-and-submit flow for a single
//! confirmation screen instance. It picks the unlock path from the wallet's
//! authorization mode, obtains the decrypted master key exactly once, hands
//! it to the submitter, and discards it. Re-entrant confirm calls are
//! rejected by state, not by wall-clock debouncing.
//!
//! State machine: Idle -> AwaitingUserInput -> Authorizing -> Submitting
//! -> {Success, Failed}, with Authorizing/Submitting returning to
//! AwaitingUserInput on user cancellation, wrong password, or a retryable
//! network failure.

use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroize;

use crate::core::crypto::encryption::KeyCrypto;
use crate::core::crypto::keys::MasterKey;
use crate::domain::Wallet;
use crate::infrastructure::secret_store::SecretStore;
use crate::shared::constants::MASTER_PASSWORD_KEY_NAME;
use crate::shared::error::WalletError;
use crate::shared::types::{AuthorizationMode, KeyType, TransactionDraft};
use crate::shared::WalletResult;

/// Confirmation flow state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    Idle,
    AwaitingUserInput,
    Authorizing,
    Submitting,
    Success,
    Failed,
}

/// Outcome of a biometric unlock attempt. Exactly one of the three
/// platform results maps to each variant.
pub enum BiometricOutcome {
    /// Unlock succeeded; carries the decrypted master key
    Unlocked(MasterKey),
    /// User backed out; no side effect
    Cancelled,
    /// Enrollment changed or the hardware key was invalidated since setup
    HardwareInvalidated,
}

/// Result reported to the UI layer after a confirm call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Submission succeeded; navigate to transaction history
    Submitted,
    /// A confirm was already in flight (or the flow already finished);
    /// this call was ignored
    Ignored,
    /// User cancelled the biometric prompt; draft untouched
    Cancelled,
    /// Decryption rejected the entered password; draft and password
    /// retained for retry
    PasswordRejected,
    /// Submission failed with a network error; retry permitted by
    /// re-confirming
    NetworkFailed,
    /// System authentication is no longer usable. The wallet must be
    /// closed and the session returned to wallet selection.
    WalletLocked,
}

/// Biometric unlock service (platform-provided)
#[async_trait]
pub trait BiometricUnlock: Send + Sync {
    /// Verify the stored biometric-backed keys are still usable. Fails
    /// with [`WalletError::SystemAuthDisabled`] when enrollment or the
    /// hardware key has been invalidated since setup.
    async fn ensure_keys_validity(&self, key_id: &str) -> WalletResult<()>;

    /// Run the platform unlock prompt
    async fn unlock(&self, key_id: &str) -> WalletResult<BiometricOutcome>;
}

/// Network submission of a signed transaction (external)
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Sign and submit. Failures are classified by the error variant:
    /// `Network` is retryable, everything else is fatal to the flow.
    async fn submit(&self, key: &MasterKey, draft: &TransactionDraft) -> WalletResult<()>;
}

/// Drives one confirmation flow for one wallet session
pub struct AuthorizationCoordinator {
    wallet_id: String,
    mode: AuthorizationMode,
    store: Arc<dyn SecretStore>,
    biometric: Arc<dyn BiometricUnlock>,
    submitter: Arc<dyn TransactionSubmitter>,
    crypto: KeyCrypto,
    state: ConfirmState,
    draft: Option<TransactionDraft>,
    password: String,
}

impl AuthorizationCoordinator {
    pub fn new(
        wallet: &Wallet,
        store: Arc<dyn SecretStore>,
        biometric: Arc<dyn BiometricUnlock>,
        submitter: Arc<dyn TransactionSubmitter>,
    ) -> Self {
        Self {
            wallet_id: wallet.id.clone(),
            mode: wallet.auth_mode,
            store,
            biometric,
            submitter,
            crypto: KeyCrypto::new(),
            state: ConfirmState::Idle,
            draft: None,
            password: String::new(),
        }
    }

    /// Present a draft for confirmation: Idle -> AwaitingUserInput
    pub fn begin(&mut self, draft: TransactionDraft) -> WalletResult<()> {
        if self.state != ConfirmState::Idle {
            return Err(WalletError::internal("Confirmation already in progress"));
        }
        self.draft = Some(draft);
        self.state = ConfirmState::AwaitingUserInput;
        Ok(())
    }

    /// Record the user-entered spending password (password mode only)
    pub fn set_password(&mut self, password: &str) {
        self.password.zeroize();
        self.password = password.to_string();
    }

    /// Whether the confirm control should be enabled. In password mode
    /// submission stays disabled until a password has been entered.
    pub fn can_confirm(&self) -> bool {
        self.state == ConfirmState::AwaitingUserInput
            && (self.mode == AuthorizationMode::EasyConfirmation || !self.password.is_empty())
    }

    pub fn state(&self) -> ConfirmState {
        self.state
    }

    pub fn draft(&self) -> Option<&TransactionDraft> {
        self.draft.as_ref()
    }

    /// Handle the confirm action.
    ///
    /// Only one confirm may be in flight; calls issued while the flow is
    /// authorizing, submitting, or already finished return
    /// [`ConfirmOutcome::Ignored`] without queueing or erroring.
    pub async fn confirm(&mut self) -> WalletResult<ConfirmOutcome> {
        match self.state {
            ConfirmState::AwaitingUserInput => {}
            ConfirmState::Idle => {
                return Err(WalletError::internal("No confirmation in progress"))
            }
            _ => return Ok(ConfirmOutcome::Ignored),
        }

        let draft = self
            .draft
            .clone()
            .ok_or_else(|| WalletError::internal("Missing transaction draft"))?;

        match self.mode {
            AuthorizationMode::EasyConfirmation => self.confirm_easy(draft).await,
            AuthorizationMode::PasswordRequired => self.confirm_with_password(draft).await,
        }
    }

    /// Biometric path: validate key usability, then prompt
    async fn confirm_easy(&mut self, draft: TransactionDraft) -> WalletResult<ConfirmOutcome> {
        self.state = ConfirmState::Authorizing;

        if let Err(e) = self.biometric.ensure_keys_validity(&self.wallet_id).await {
            self.state = ConfirmState::Failed;
            return match e {
                WalletError::SystemAuthDisabled => {
                    log::warn!("System auth invalidated; locking wallet {}", self.wallet_id);
                    Ok(ConfirmOutcome::WalletLocked)
                }
                other => Err(other),
            };
        }

        let outcome = match self.biometric.unlock(&self.wallet_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = ConfirmState::Failed;
                return Err(e);
            }
        };

        match outcome {
            BiometricOutcome::Unlocked(key) => self.submit_with_key(key, draft).await,
            BiometricOutcome::Cancelled => {
                // Cancels this branch only; draft stays put
                self.state = ConfirmState::AwaitingUserInput;
                Ok(ConfirmOutcome::Cancelled)
            }
            BiometricOutcome::HardwareInvalidated => {
                log::warn!("Hardware key invalidated; locking wallet {}", self.wallet_id);
                self.state = ConfirmState::Failed;
                Ok(ConfirmOutcome::WalletLocked)
            }
        }
    }

    /// Password path: fetch the stored blob and decrypt it
    async fn confirm_with_password(
        &mut self,
        draft: TransactionDraft,
    ) -> WalletResult<ConfirmOutcome> {
        if self.password.is_empty() {
            return Err(WalletError::validation("Password required"));
        }
        self.state = ConfirmState::Authorizing;

        let blob = match self
            .store
            .get(
                &self.wallet_id,
                MASTER_PASSWORD_KEY_NAME,
                KeyType::MasterPassword,
                "",
            )
            .await
        {
            Ok(blob) => blob,
            Err(e) => {
                self.state = ConfirmState::Failed;
                return Err(e);
            }
        };

        match self.crypto.decrypt(&self.password, &blob) {
            Ok(key) => self.submit_with_key(key, draft).await,
            Err(WalletError::WrongPassword) => {
                // Draft and entered password retained for retry
                self.state = ConfirmState::AwaitingUserInput;
                Ok(ConfirmOutcome::PasswordRejected)
            }
            Err(e) => {
                self.state = ConfirmState::Failed;
                Err(e)
            }
        }
    }

    /// Hand the decrypted key to the submitter exactly once and discard it
    async fn submit_with_key(
        &mut self,
        key: MasterKey,
        draft: TransactionDraft,
    ) -> WalletResult<ConfirmOutcome> {
        self.state = ConfirmState::Submitting;
        let result = self.submitter.submit(&key, &draft).await;
        drop(key); // zeroized; must not outlive the submission

        match result {
            Ok(()) => {
                self.state = ConfirmState::Success;
                self.draft = None;
                self.password.zeroize();
                Ok(ConfirmOutcome::Submitted)
            }
            Err(e) if e.is_retryable() => {
                log::warn!("Transaction submission failed: {}", e);
                self.state = ConfirmState::AwaitingUserInput;
                Ok(ConfirmOutcome::NetworkFailed)
            }
            Err(e) => {
                self.state = ConfirmState::Failed;
                self.draft = None;
                self.password.zeroize();
                Err(e)
            }
        }
    }
}
