//! Command-line front end for the league manager API.
//!
//! # Design
//! Every subcommand drives one of the page controllers from `league-core` and
//! prints the outcome as plain text. A single `LeagueApi` (and therefore a
//! single cookie jar) lives for the whole invocation, so `--email` and
//! `--password` sign in first and the command runs inside that session.

pub mod cli;
pub mod transport;

use std::io::Write;

use league_core::pages::{
    ActionOutcome, AuthPage, LeagueDetailPage, LeagueView, LoadOutcome, NavBar,
    Notice, TeamManagement,
};
use league_core::{LeagueApi, Transport};

pub use cli::{Cli, Command};
pub use transport::UreqTransport;

/// How the invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
    LoginRequired,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
            Exit::LoginRequired => 2,
        }
    }
}

fn print_notice(out: &mut impl Write, notice: &Notice) -> anyhow::Result<Exit> {
    writeln!(out, "{}", notice.text)?;
    Ok(if notice.is_error() {
        Exit::Failure
    } else {
        Exit::Success
    })
}

fn print_view(out: &mut impl Write, view: &LeagueView) -> anyhow::Result<()> {
    writeln!(out, "{} ({})", view.league_name, view.season_year)?;
    writeln!(out, "status: {}", view.status)?;
    writeln!(out, "your role: {}", view.user_role)?;
    match view.management {
        TeamManagement::OnTeam { team_id } => writeln!(out, "your team: {team_id}")?,
        TeamManagement::NoTeam => writeln!(out, "you are not managing a team in this league")?,
    }
    if view.teams.is_empty() {
        writeln!(out, "No teams have been created in this league yet.")?;
    }
    for team in &view.teams {
        writeln!(
            out,
            "  [{}] {} (owner: {}, members: {})",
            team.team_id, team.team_name, team.owner_username, team.member_count
        )?;
    }
    Ok(())
}

fn print_load(out: &mut impl Write, outcome: &LoadOutcome) -> anyhow::Result<Exit> {
    match outcome {
        LoadOutcome::Loaded(view) => {
            print_view(out, view)?;
            Ok(Exit::Success)
        }
        LoadOutcome::RedirectToLogin { notice, .. } => {
            writeln!(out, "{}", notice.text)?;
            Ok(Exit::LoginRequired)
        }
        LoadOutcome::Failed(notice) => print_notice(out, notice),
    }
}

fn print_action(out: &mut impl Write, outcome: &ActionOutcome) -> anyhow::Result<Exit> {
    match outcome {
        ActionOutcome::Rejected(notice) | ActionOutcome::Failed(notice) => print_notice(out, notice),
        ActionOutcome::RedirectToLogin { notice, .. } => {
            writeln!(out, "{}", notice.text)?;
            Ok(Exit::LoginRequired)
        }
        ActionOutcome::Completed { notice, refreshed } => {
            writeln!(out, "{}", notice.text)?;
            print_load(out, refreshed)
        }
    }
}

/// Load `league_id` and stop early unless the dashboard loaded.
fn load_league<T: Transport>(
    api: &LeagueApi<T>,
    league_id: &str,
    out: &mut impl Write,
) -> anyhow::Result<Result<LeagueDetailPage, Exit>> {
    let mut page = LeagueDetailPage::new();
    match page.load(api, Some(league_id)) {
        LoadOutcome::Loaded(_) => Ok(Ok(page)),
        other => Ok(Err(print_load(out, &other)?)),
    }
}

/// Run `cli.command` against `api`, writing human-readable output to `out`.
pub fn run<T: Transport>(cli: &Cli, api: &LeagueApi<T>, out: &mut impl Write) -> anyhow::Result<Exit> {
    let mut auth = AuthPage::new();

    let signs_in_itself = matches!(cli.command, Command::Register { .. } | Command::Login);
    if !signs_in_itself {
        if let Some((email, password)) = cli.credentials() {
            let outcome = auth.submit_login(api, email, password);
            if outcome.notice.is_error() {
                return print_notice(out, &outcome.notice);
            }
            tracing::debug!("signed in before running command");
        }
    }

    match &cli.command {
        Command::Status => match api.status() {
            Ok(status) => {
                writeln!(out, "{} (database: {})", status.status, status.db_status)?;
                Ok(Exit::Success)
            }
            Err(e) => print_notice(out, &Notice::error(e.message())),
        },
        Command::Leagues => match api.list_leagues() {
            Ok(leagues) => {
                for league in leagues {
                    writeln!(
                        out,
                        "[{}] {} {} ({})",
                        league.league_id, league.name, league.season_year, league.status
                    )?;
                }
                Ok(Exit::Success)
            }
            Err(e) if e.is_unauthorized() => {
                writeln!(out, "Not signed in.")?;
                Ok(Exit::LoginRequired)
            }
            Err(e) => print_notice(out, &Notice::error(e.message())),
        },
        Command::Details { league_id } => {
            let mut page = LeagueDetailPage::new();
            let outcome = page.load(api, Some(league_id));
            let exit = print_load(out, &outcome)?;
            if exit == Exit::Success && page.user_team_id().is_none() {
                let open: Vec<String> = page
                    .joinable_teams()
                    .iter()
                    .map(|t| t.team_id.to_string())
                    .collect();
                if !open.is_empty() {
                    writeln!(out, "teams with a free slot: {}", open.join(", "))?;
                }
            }
            Ok(exit)
        }
        Command::CreateTeam {
            league_id,
            team_name,
        } => match load_league(api, &league_id.to_string(), out)? {
            Ok(mut page) => print_action(out, &page.create_team(api, team_name)),
            Err(exit) => Ok(exit),
        },
        Command::JoinTeam { league_id, team_id } => {
            match load_league(api, &league_id.to_string(), out)? {
                Ok(mut page) => print_action(out, &page.join_team(api, *team_id)),
                Err(exit) => Ok(exit),
            }
        }
        Command::Logout => {
            let target = NavBar::new().logout(api);
            writeln!(out, "Signed out. next: {}", target.location())?;
            Ok(Exit::Success)
        }
        Command::Register { name } => {
            let Some((email, password)) = cli.credentials() else {
                anyhow::bail!("register needs --email and --password");
            };
            let notice = auth.submit_registration(api, name, email, password);
            print_notice(out, &notice)
        }
        Command::Login => {
            let Some((email, password)) = cli.credentials() else {
                anyhow::bail!("login needs --email and --password");
            };
            let outcome = auth.submit_login(api, email, password);
            match &outcome.navigate {
                Some(target) if !outcome.notice.is_error() => {
                    writeln!(out, "{}", outcome.notice.text)?;
                    writeln!(out, "next: {}", target.location())?;
                    Ok(Exit::Success)
                }
                _ => print_notice(out, &outcome.notice),
            }
        }
    }
}
