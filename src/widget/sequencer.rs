//! "Last issued wins" bookkeeping for asynchronous requests.
//!
//! Every outgoing request of a given kind is stamped with a token that is
//! strictly greater than any earlier token of that kind. When a response
//! arrives, only the holder of the newest token may touch shared state;
//! anything older is dropped regardless of the order responses arrive in.

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};

/// Independent request streams; tokens of one kind never affect another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Search,
    Detail,
    Recommend,
}

impl RequestKind {
    pub const ALL: [RequestKind; 3] = [
        RequestKind::Search,
        RequestKind::Detail,
        RequestKind::Recommend,
    ];

    fn index(self) -> usize {
        match self {
            RequestKind::Search => 0,
            RequestKind::Detail => 1,
            RequestKind::Recommend => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Search => "search",
            RequestKind::Detail => "detail",
            RequestKind::Recommend => "recommend",
        }
    }
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque, monotonically increasing stamp for one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: [AtomicU64; 3],
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a new token for `kind`, superseding every earlier one
    pub fn issue(&self, kind: RequestKind) -> RequestToken {
        let value = self.latest[kind.index()].fetch_add(1, Ordering::SeqCst) + 1;
        RequestToken(value)
    }

    /// True only if no newer request of `kind` has been issued since `token`
    pub fn is_latest(&self, kind: RequestKind, token: RequestToken) -> bool {
        self.latest[kind.index()].load(Ordering::SeqCst) == token.0
    }
}
