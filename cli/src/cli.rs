use clap::{Parser, Subcommand};

use league_core::{LeagueId, TeamId};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Parser, Debug)]
#[command(name = "league")]
#[command(about = "Command-line client for the league manager API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend origin
    #[arg(long, global = true, env = "LEAGUE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Account email; with --password, signs in before running the command
    #[arg(long, global = true, env = "LEAGUE_EMAIL")]
    pub email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "LEAGUE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Log every request and response status
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Check that the backend is up
    Status,

    /// Create an account using --email and --password
    Register {
        /// Display name
        #[arg(long)]
        name: String,
    },

    /// Check --email and --password by signing in.
    ///
    /// The session ends with the process; pass the credentials to any other
    /// command to run it signed in.
    Login,

    /// List leagues (requires a session)
    Leagues,

    /// Show a league's dashboard
    Details {
        /// League id
        league_id: String,
    },

    /// Create a team in a league
    CreateTeam {
        league_id: LeagueId,
        team_name: String,
    },

    /// Join an existing team that still has a free slot
    JoinTeam { league_id: LeagueId, team_id: TeamId },

    /// End the session
    Logout,
}

impl Cli {
    /// Email and password, when both were supplied.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.email.as_deref()?, self.password.as_deref()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_details_with_global_credentials() {
        let cli = Cli::try_parse_from([
            "league",
            "details",
            "3",
            "--email",
            "ana@example.com",
            "--password",
            "pw",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Details {
                league_id: "3".to_string()
            }
        );
        assert_eq!(cli.credentials(), Some(("ana@example.com", "pw")));
    }

    #[test]
    fn credentials_need_both_fields() {
        let cli = Cli::try_parse_from(["league", "--email", "ana@example.com", "leagues"]).unwrap();
        assert_eq!(cli.credentials(), None);
    }

    #[test]
    fn join_team_requires_numeric_ids() {
        assert!(Cli::try_parse_from(["league", "join-team", "1", "two"]).is_err());
        let cli = Cli::try_parse_from(["league", "join-team", "1", "2"]).unwrap();
        assert_eq!(
            cli.command,
            Command::JoinTeam {
                league_id: 1,
                team_id: 2
            }
        );
    }

    #[test]
    fn register_requires_name() {
        assert!(Cli::try_parse_from(["league", "register"]).is_err());
    }
}
