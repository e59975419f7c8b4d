use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile section to read from the profile file. Default is 'default'.
    /// If the profile is not configured, built-in defaults are used.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Server override
    /// Optional. Base URL of the Onepass server, replacing the profile's value.
    #[clap(short = 's', long, help = "Onepass server base URL")]
    server: Option<String>,

    /// Verbose mode
    /// Optional. Print debug logs to stderr.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    server: Option<String>,
    verbose: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from(ClapArgs::parse_from(itr))
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            server: args.server,
            verbose: args.verbose,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_profile_only() {
        let args = CommandLineArgs::parse_from(["program", "--profile", "test"]);
        assert_eq!(args.profile(), "test");
        assert!(!args.verbose());
        assert_eq!(args.server(), None);
    }

    #[test]
    fn test_parse_args_server_override() {
        let args = CommandLineArgs::parse_from(["program", "--server", "http://vault.local:8080"]);
        assert_eq!(args.server(), Some("http://vault.local:8080"));
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-p", "dev", "-v", "-s", "http://x"]);
        assert_eq!(args.profile(), "dev");
        assert!(args.verbose());
        assert_eq!(args.server(), Some("http://x"));
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert_eq!(args.profile(), "default");
        assert!(!args.verbose());
    }
}
