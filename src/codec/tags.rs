//! Tag strings understood by the builtin codec library.
//!
//! Every builtin type is addressed by its full tag; the helpers at the
//! bottom build domain and private tags the same way the registries do.
//! Used by the `loader` and `dumper` modules.

/// Prefix of every builtin tag.
pub const BUILTIN_PREFIX: &str = "tag:yaml.org,2002:";
/// Prefix of private (application-local) tags.
pub const PRIVATE_PREFIX: &str = "x-private:";

pub const NULL: &str = "tag:yaml.org,2002:null";
pub const BOOL: &str = "tag:yaml.org,2002:bool";
pub const BOOL_YES: &str = "tag:yaml.org,2002:bool#yes";
pub const BOOL_NO: &str = "tag:yaml.org,2002:bool#no";
pub const INT: &str = "tag:yaml.org,2002:int";
pub const INT_HEX: &str = "tag:yaml.org,2002:int#hex";
pub const INT_OCT: &str = "tag:yaml.org,2002:int#oct";
pub const INT_BASE60: &str = "tag:yaml.org,2002:int#base60";
pub const FLOAT: &str = "tag:yaml.org,2002:float";
pub const FLOAT_FIX: &str = "tag:yaml.org,2002:float#fix";
pub const FLOAT_EXP: &str = "tag:yaml.org,2002:float#exp";
pub const FLOAT_BASE60: &str = "tag:yaml.org,2002:float#base60";
pub const FLOAT_INF: &str = "tag:yaml.org,2002:float#inf";
pub const FLOAT_NEGINF: &str = "tag:yaml.org,2002:float#neginf";
pub const FLOAT_NAN: &str = "tag:yaml.org,2002:float#nan";
pub const STR: &str = "tag:yaml.org,2002:str";
pub const BINARY: &str = "tag:yaml.org,2002:binary";
pub const TIMESTAMP: &str = "tag:yaml.org,2002:timestamp";
pub const TIMESTAMP_YMD: &str = "tag:yaml.org,2002:timestamp#ymd";
pub const TIMESTAMP_ISO8601: &str = "tag:yaml.org,2002:timestamp#iso8601";
pub const TIMESTAMP_SPACED: &str = "tag:yaml.org,2002:timestamp#spaced";
pub const MERGE: &str = "tag:yaml.org,2002:merge";
pub const OMAP: &str = "tag:yaml.org,2002:omap";
pub const PAIRS: &str = "tag:yaml.org,2002:pairs";
pub const SET: &str = "tag:yaml.org,2002:set";
pub const SEQ: &str = "tag:yaml.org,2002:seq";
pub const MAP: &str = "tag:yaml.org,2002:map";

/// `tag:yaml.org,2002:<short>`
pub fn builtin(short: &str) -> String {
    format!("{BUILTIN_PREFIX}{short}")
}

/// `tag:<domain>:<short>`
pub fn domain(domain: &str, short: &str) -> String {
    format!("tag:{domain}:{short}")
}

/// `x-private:<short>`
pub fn private(short: &str) -> String {
    format!("{PRIVATE_PREFIX}{short}")
}
