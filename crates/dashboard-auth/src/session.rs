use dashboard_core::{Backend, ResolvedSession, UserProfile};

use crate::backend::RawLogin;
use crate::backends::gpg::GpgUser;
use crate::backends::valesco::ValescoUser;
use crate::error::BackendError;

/// A validated login result from one backend, awaiting priority selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSession {
    Gpg { token: String, user: GpgUser },
    Valesco { token: String, user: ValescoUser },
}

impl CandidateSession {
    pub fn backend(&self) -> Backend {
        match self {
            Self::Gpg { .. } => Backend::Gpg,
            Self::Valesco { .. } => Backend::Valesco,
        }
    }

    /// Normalize into the persisted session shape.
    pub fn into_resolved(self) -> ResolvedSession {
        let backend = self.backend();
        let (token, user): (String, UserProfile) = match self {
            Self::Gpg { token, user } => (token, user.into()),
            Self::Valesco { token, user } => (token, user.into()),
        };
        ResolvedSession::new(backend, token, user)
    }
}

fn non_empty(token: Option<String>) -> Result<String, BackendError> {
    token
        .filter(|t| !t.is_empty())
        .ok_or(BackendError::InvalidPayload("access token"))
}

impl TryFrom<RawLogin> for CandidateSession {
    type Error = BackendError;

    /// A payload only counts with a non-empty token and a user object.
    fn try_from(raw: RawLogin) -> Result<Self, Self::Error> {
        match raw {
            RawLogin::Gpg(resp) => Ok(Self::Gpg {
                token: non_empty(resp.access_token)?,
                user: resp.user.ok_or(BackendError::InvalidPayload("user"))?,
            }),
            RawLogin::Valesco(resp) => Ok(Self::Valesco {
                token: non_empty(resp.access_token)?,
                user: resp.user.ok_or(BackendError::InvalidPayload("user"))?,
            }),
        }
    }
}
