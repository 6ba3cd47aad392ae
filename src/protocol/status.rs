//! Status line parsing
//!
//! Every reply starts with `<3-digit code> <free text>`. The first digit
//! selects the class of the reply (RFC 2229 section 2.4).

use crate::error::{DictError, Result};

// =============================================================================
// Reply Codes
// =============================================================================

/// `110 n databases present`
pub const DATABASES_PRESENT: u16 = 110;
/// `111 n strategies available`
pub const STRATEGIES_AVAILABLE: u16 = 111;
/// `112 database information follows`
pub const DATABASE_INFO: u16 = 112;
/// `150 n definitions retrieved`
pub const DEFINITIONS_RETRIEVED: u16 = 150;
/// `151 word database name`
pub const DEFINITION_FOLLOWS: u16 = 151;
/// `152 n matches found`
pub const MATCHES_FOUND: u16 = 152;
/// `220 text msg-id` greeting banner
pub const GREETING: u16 = 220;
/// `221 Closing Connection`
pub const CLOSING: u16 = 221;
/// `250 ok`
pub const OK: u16 = 250;
/// `420 Server temporarily unavailable`
pub const SERVER_UNAVAILABLE: u16 = 420;
/// `421 Server shutting down at operator request`
pub const SERVER_SHUTTING_DOWN: u16 = 421;
/// `500 Syntax error, command not recognized`
pub const SYNTAX_ERROR: u16 = 500;
/// `501 Syntax error, illegal parameters`
pub const ILLEGAL_PARAMETERS: u16 = 501;
/// `502 Command not implemented`
pub const NOT_IMPLEMENTED: u16 = 502;
/// `503 Command parameter not implemented`
pub const PARAMETER_NOT_IMPLEMENTED: u16 = 503;
/// `550 Invalid database`
pub const INVALID_DATABASE: u16 = 550;
/// `551 Invalid strategy`
pub const INVALID_STRATEGY: u16 = 551;
/// `552 No match`
pub const NO_MATCH: u16 = 552;
/// `554 No databases present`
pub const NO_DATABASES: u16 = 554;
/// `555 No strategies available`
pub const NO_STRATEGIES: u16 = 555;

/// Reply class, from the first digit of the code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 1yz: accepted, text follows
    PositivePreliminary,
    /// 2yz: command completed
    PositiveCompletion,
    /// 3yz: accepted, awaiting more input
    PositiveIntermediate,
    /// 4yz: not accepted, may succeed later
    TransientNegative,
    /// 5yz: not accepted
    PermanentNegative,
}

/// A parsed status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    code: u16,
    class: StatusClass,
    detail: Option<String>,
}

impl Status {
    /// Parse a status line (line terminator already stripped)
    pub fn parse(line: &str) -> Result<Self> {
        let bytes = line.as_bytes();
        if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
            return Err(DictError::malformed(format!(
                "expected status line, got {:?}",
                line
            )));
        }

        let code = u16::from(bytes[0] - b'0') * 100
            + u16::from(bytes[1] - b'0') * 10
            + u16::from(bytes[2] - b'0');

        let class = match bytes[0] {
            b'1' => StatusClass::PositivePreliminary,
            b'2' => StatusClass::PositiveCompletion,
            b'3' => StatusClass::PositiveIntermediate,
            b'4' => StatusClass::TransientNegative,
            b'5' => StatusClass::PermanentNegative,
            _ => {
                return Err(DictError::malformed(format!(
                    "status code {:03} out of range",
                    code
                )))
            }
        };

        let detail = match &line[3..] {
            "" => None,
            rest if rest.starts_with(' ') => {
                let text = rest[1..].trim_end();
                (!text.is_empty()).then(|| text.to_string())
            }
            _ => {
                return Err(DictError::malformed(format!(
                    "missing space after status code in {:?}",
                    line
                )))
            }
        };

        Ok(Self { code, class, detail })
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn class(&self) -> StatusClass {
        self.class
    }

    /// Free text after the code, if any
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Whether the server refused the command (4yz or 5yz)
    pub fn is_negative(&self) -> bool {
        matches!(
            self.class,
            StatusClass::TransientNegative | StatusClass::PermanentNegative
        )
    }

    /// Whether text or further status lines follow (1yz)
    pub fn is_preliminary(&self) -> bool {
        self.class == StatusClass::PositivePreliminary
    }

    /// Whether the exchange is complete (2yz)
    pub fn is_completion(&self) -> bool {
        self.class == StatusClass::PositiveCompletion
    }

    /// Turn this status into an error carrying its code and detail
    pub fn into_error(self) -> DictError {
        DictError::status(self.code, self.detail.unwrap_or_default())
    }

    /// Require a specific code, otherwise fail with this status as the error
    pub fn expect_code(self, expected: u16) -> Result<Self> {
        if self.code == expected {
            Ok(self)
        } else {
            Err(self.into_error())
        }
    }
}
