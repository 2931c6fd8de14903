//! `docker run` flag table
//!
//! Maps every supported flag spelling to what it sets on a
//! [`ServiceDescriptor`](dockform_core::ServiceDescriptor). Long, short and
//! inline (`--flag=value`) spellings of the same flag are equivalent.

use phf::phf_map;

/// Flags that consume a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueFlag {
    Name,
    Restart,
    Network,
    Entrypoint,
    Workdir,
    User,
    /// Repeatable
    Env,
    /// Repeatable
    Publish,
    /// Repeatable
    Volume,
    /// Repeatable
    Label,
    /// Repeatable
    AddHost,
    /// Repeatable; only reported, file contents are never inlined
    EnvFile,
}

/// Flags that take no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Switch {
    Privileged,
    Interactive,
    Tty,
    /// `-it` / `-ti`
    InteractiveTty,
    Rm,
    Detach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Value(ValueFlag),
    Switch(Switch),
}

// =============================================================================
// FLAG SPELLINGS
// =============================================================================

pub static FLAGS: phf::Map<&'static str, Flag> = phf_map! {
    "--name" => Flag::Value(ValueFlag::Name),
    "--restart" => Flag::Value(ValueFlag::Restart),
    "--network" => Flag::Value(ValueFlag::Network),
    "--entrypoint" => Flag::Value(ValueFlag::Entrypoint),
    "--workdir" => Flag::Value(ValueFlag::Workdir),
    "-w" => Flag::Value(ValueFlag::Workdir),
    "--user" => Flag::Value(ValueFlag::User),
    "-u" => Flag::Value(ValueFlag::User),
    "--env" => Flag::Value(ValueFlag::Env),
    "-e" => Flag::Value(ValueFlag::Env),
    "--publish" => Flag::Value(ValueFlag::Publish),
    "-p" => Flag::Value(ValueFlag::Publish),
    "--volume" => Flag::Value(ValueFlag::Volume),
    "-v" => Flag::Value(ValueFlag::Volume),
    "--label" => Flag::Value(ValueFlag::Label),
    "-l" => Flag::Value(ValueFlag::Label),
    "--add-host" => Flag::Value(ValueFlag::AddHost),
    "--env-file" => Flag::Value(ValueFlag::EnvFile),

    "--privileged" => Flag::Switch(Switch::Privileged),
    "--interactive" => Flag::Switch(Switch::Interactive),
    "-i" => Flag::Switch(Switch::Interactive),
    "--tty" => Flag::Switch(Switch::Tty),
    "-t" => Flag::Switch(Switch::Tty),
    "-it" => Flag::Switch(Switch::InteractiveTty),
    "-ti" => Flag::Switch(Switch::InteractiveTty),
    "--rm" => Flag::Switch(Switch::Rm),
    "--detach" => Flag::Switch(Switch::Detach),
    "-d" => Flag::Switch(Switch::Detach),
};

/// Short flags that also accept their value glued on (`-p8080:80`)
pub static ATTACHED: [(&str, ValueFlag); 3] = [
    ("-p", ValueFlag::Publish),
    ("-e", ValueFlag::Env),
    ("-v", ValueFlag::Volume),
];

/// Positionals skipped before the image
pub const PREAMBLE: [&str; 2] = ["docker", "run"];

/// Ends flag parsing: everything after it is the command
pub const END_OF_FLAGS: &str = "--";

/// How one token reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// `docker` / `run`
    Preamble,
    /// A flag whose value is the next token
    Value(ValueFlag),
    /// A flag carrying its own value (`--name=web`, `-p80:80`)
    Inline(ValueFlag, &'a str),
    Switch(Switch),
    /// `--`
    EndOfFlags,
    /// Dash-prefixed, but not in the table
    Unknown,
    /// Anything else: the image, and the start of the command
    Positional,
}

/// Classify one token, before the image has been found
pub fn classify(token: &str) -> TokenKind<'_> {
    if PREAMBLE.contains(&token) {
        return TokenKind::Preamble;
    }

    if let Some(flag) = FLAGS.get(token) {
        return match *flag {
            Flag::Value(value) => TokenKind::Value(value),
            Flag::Switch(switch) => TokenKind::Switch(switch),
        };
    }

    if token.starts_with("--") {
        if let Some((name, value)) = token.split_once('=') {
            if let (Some(Flag::Value(flag)), false) = (FLAGS.get(name), value.is_empty()) {
                return TokenKind::Inline(*flag, value);
            }
        }
    }

    for (prefix, flag) in &ATTACHED {
        if let Some(value) = token.strip_prefix(prefix) {
            if !value.is_empty() && !token.starts_with("--") {
                return TokenKind::Inline(*flag, value);
            }
        }
    }

    if token == END_OF_FLAGS {
        TokenKind::EndOfFlags
    } else if token.starts_with('-') {
        TokenKind::Unknown
    } else {
        TokenKind::Positional
    }
}
