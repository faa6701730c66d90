use bproc_base::transport::{HttpResponse, TransportFault};

/// What a gateway call produced.
///
/// Every call returns one of these. Success means the backend answered,
/// whatever the status code; failure means no response came back at all.
/// There is no third case and nothing to catch: callers branch on the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A response arrived, passed through unreshaped.
    Success(HttpResponse),
    /// The transport produced a fault instead of a response.
    Failure(TransportFault),
}

impl RequestOutcome {
    /// Whether a response arrived.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the call failed without a response.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Get the response, if one arrived.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Success(response) => Some(response),
            Self::Failure(_) => None,
        }
    }

    /// Get the fault, if the call failed.
    pub fn fault(&self) -> Option<&TransportFault> {
        match self {
            Self::Success(_) => None,
            Self::Failure(fault) => Some(fault),
        }
    }

    /// Convert into a standard Result for callers that want to branch
    /// with `match` or `?` against their own error type.
    pub fn into_result(self) -> Result<HttpResponse, TransportFault> {
        match self {
            Self::Success(response) => Ok(response),
            Self::Failure(fault) => Err(fault),
        }
    }
}
