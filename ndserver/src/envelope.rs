//! Response envelope returned by every command handler. The wire format
//! of the request itself is out of scope; this is the fixed response
//! shape every handler produces: a type tag plus a message.

use crate::error::ServerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three response tags the wire protocol distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsgType {
    Normal,
    Error,
    Warning,
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MsgType::Normal => write!(f, "NORMAL"),
            MsgType::Error => write!(f, "ERROR"),
            MsgType::Warning => write!(f, "WARNING"),
        }
    }
}

/// A command's response: a type tag plus a message string. `binopvv`
/// and `binopvs`/`binopsv` carry the server-assigned name of the newly
/// created result array in `msg` on success; `opeqvv`/`opeqvs` carry a
/// short success marker; `clip` behaves like `binopvv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyMsg {
    pub msg_type: MsgType,
    pub msg: String,
}

impl ReplyMsg {
    pub fn normal(msg: impl Into<String>) -> Self {
        ReplyMsg {
            msg_type: MsgType::Normal,
            msg: msg.into(),
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        ReplyMsg {
            msg_type: MsgType::Warning,
            msg: msg.into(),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        ReplyMsg {
            msg_type: MsgType::Error,
            msg: msg.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.msg_type == MsgType::Error
    }
}

impl From<ServerError> for ReplyMsg {
    fn from(err: ServerError) -> Self {
        ReplyMsg::error(err.to_string())
    }
}

impl fmt::Display for ReplyMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.msg_type, self.msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_converts_to_error_reply() {
        let err = ServerError::UndefinedSymbol("foo".to_string());
        let reply: ReplyMsg = err.into();
        assert_eq!(reply.msg_type, MsgType::Error);
        assert_eq!(reply.msg, "Error: unknown symbol 'foo'");
    }

    #[test]
    fn display_matches_wire_tag_names() {
        assert_eq!(ReplyMsg::normal("id_0").to_string(), "NORMAL: id_0");
        assert_eq!(ReplyMsg::warning("slow path").to_string(), "WARNING: slow path");
    }
}
