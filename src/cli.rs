//! Command-line surface and release workflow driver.
//!
//! Argument parsing stays here; the release decisions live in
//! [crate::manager]. The driver returns one result per requested module so
//! the binary can turn partial failures into a single exit decision.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use crate::auth::SshKeyAuth;
use crate::config::{self, FileConfig, Identity};
use crate::error::ReleaseError;
use crate::git::Repository;
use crate::manager::ReleaseManager;
use crate::scheme::{BranchContext, DateScheme};
use crate::ui::{dry_run_summary, manual_push_hint, push_recovery_hint, Ui};

#[derive(Debug, Parser)]
#[command(
    name = "git-release",
    version,
    about = "Compute the next release identifier and record it as a git tag"
)]
pub struct Args {
    #[arg(
        short = 'c',
        long = "component",
        value_name = "NAME",
        help = "Component to release, repeatable; may also be given as positional arguments"
    )]
    pub component: Vec<String>,

    #[arg(value_name = "COMPONENT", help = "Components to release")]
    pub positional: Vec<String>,

    #[arg(short, long, help = "Git remote to push to (if --push)")]
    pub remote: Option<String>,

    #[arg(
        short = 'm',
        long = "msg",
        default_value = "",
        help = "Optional release message, will create an annotated git tag"
    )]
    pub message: String,

    #[arg(long, default_value = "", help = "Override user from git configuration")]
    pub user: String,

    #[arg(long, default_value = "", help = "Override email from git configuration")]
    pub email: String,

    #[arg(long, help = "Use semantic versioning <major>.<minor>.<patch>")]
    pub semver: bool,

    #[arg(long, help = "Increment major version of semantic version")]
    pub inc_major: bool,

    #[arg(long, help = "Increment minor version of semantic version")]
    pub inc_minor: bool,

    #[arg(long, help = "Increment patch version of semantic version")]
    pub inc_patch: bool,

    #[arg(long, help = "Push the created tag to the remote")]
    pub push: bool,

    #[arg(
        short = 'n',
        long,
        help = "Don't create a release, just print what would be released"
    )]
    pub dry_run: bool,

    #[arg(
        long,
        value_name = "PATH",
        help = "Path to the ssh key used for pushing (default ~/.ssh/id_rsa)"
    )]
    pub ssh_key: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable more output")]
    pub verbose: bool,
}

impl Args {
    /// All requested modules, flag values first, then positionals.
    ///
    /// An empty list means one unnamed whole-repo release.
    pub fn modules(&self) -> Vec<String> {
        let mut modules: Vec<String> = self
            .component
            .iter()
            .chain(self.positional.iter())
            .cloned()
            .collect();
        if modules.is_empty() {
            modules.push(String::new());
        }
        modules
    }
}

/// Effective settings after merging flags, file config, and defaults
#[derive(Debug, Clone)]
pub struct Settings {
    pub remote: String,
    pub ssh_key: PathBuf,
    pub primary_branches: Vec<String>,
    pub include_number: bool,
}

impl Settings {
    /// Flags win over the config file, which wins over built-in defaults
    pub fn resolve(args: &Args, file: &FileConfig) -> Self {
        Settings {
            remote: args
                .remote
                .clone()
                .or_else(|| file.remote.clone())
                .unwrap_or_else(|| "origin".to_string()),
            ssh_key: args
                .ssh_key
                .clone()
                .or_else(|| file.ssh_key.clone())
                .unwrap_or_else(SshKeyAuth::default_key_path),
            primary_branches: file.primary_branches.clone(),
            include_number: file.always_include_number,
        }
    }
}

/// Lifecycle state of one release after the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseState {
    /// Computed but not created (dry run)
    Proposed,
    /// Tag created locally, push not requested
    Created,
    /// Tag created and pushed to the remote
    Pushed,
    /// Tag created locally but the push failed
    PushFailed { reason: String },
}

/// What happened to one release identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    pub tag: String,
    pub state: ReleaseState,
}

/// Per-module result of a batch run
#[derive(Debug)]
pub struct ModuleOutcome {
    pub module: String,
    pub result: std::result::Result<ReleaseReport, ReleaseError>,
}

impl ModuleOutcome {
    /// True when this module's release failed to create or push
    pub fn failed(&self) -> bool {
        match &self.result {
            Err(_) => true,
            Ok(report) => matches!(report.state, ReleaseState::PushFailed { .. }),
        }
    }
}

/// Load configuration, open the repository at the working directory, and
/// run the release batch.
pub fn run(args: &Args, ui: &Ui) -> Result<Vec<ModuleOutcome>> {
    let file_config = match config::load_file_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui.debug(&format!("{}, falling back to defaults", e));
            FileConfig::default()
        }
    };
    let settings = Settings::resolve(args, &file_config);

    let identity = config::resolve_identity(&args.user, &args.email);
    if identity.is_empty() {
        ui.debug("no identity from flags or git config, this is only a problem for annotated tags");
    }

    let scheme = DateScheme::default().with_number(settings.include_number);
    let manager = ReleaseManager::open(".", scheme).context("failed to load release manager")?;

    run_with_manager(args, ui, &manager, &settings, &identity)
}

/// Drive the release batch against an already-opened manager.
///
/// Per-module failures are recorded in the returned list and do not stop
/// the remaining modules; only a failing remote check (with `--push`)
/// aborts before any tag is created.
pub fn run_with_manager<R: Repository>(
    args: &Args,
    ui: &Ui,
    manager: &ReleaseManager<R>,
    settings: &Settings,
    identity: &Identity,
) -> Result<Vec<ModuleOutcome>> {
    let modules = args.modules();

    if args.push {
        manager.check_remote(&settings.remote).with_context(|| {
            format!(
                "problem with remote '{}', cannot push, omit --push or fix the remote",
                settings.remote
            )
        })?;
    }

    let today = Local::now().date_naive();

    // One proposal for the whole semver batch; the date scheme instead
    // recomputes per module so each counter sees tags created before it.
    let semver_names = if args.semver {
        let branch = manager.current_branch()?;
        let context = BranchContext::new(branch, &settings.primary_branches);
        let proposal = manager
            .propose_semver()?
            .increment(args.inc_major, args.inc_minor, args.inc_patch);
        Some(
            modules
                .iter()
                .map(|module| proposal.format_release(module, &context))
                .collect::<Vec<_>>(),
        )
    } else {
        None
    };

    if args.dry_run {
        let names = match &semver_names {
            Some(names) => names.clone(),
            None => {
                // Plan against an overlay of the tag list so the printed
                // counters match what a real run would create.
                let mut overlay = manager.list_tags()?;
                let mut names = Vec::with_capacity(modules.len());
                for module in &modules {
                    let name = manager.date_scheme().propose(today, &overlay, module)?;
                    overlay.push(name.clone());
                    names.push(name);
                }
                names
            }
        };

        println!("{}", dry_run_summary(&names));

        return Ok(modules
            .into_iter()
            .zip(names)
            .map(|(module, tag)| ModuleOutcome {
                module,
                result: Ok(ReleaseReport {
                    tag,
                    state: ReleaseState::Proposed,
                }),
            })
            .collect());
    }

    let auth = SshKeyAuth::new(&settings.ssh_key);
    let mut outcomes = Vec::with_capacity(modules.len());

    for (idx, module) in modules.iter().enumerate() {
        let name = match &semver_names {
            Some(names) => names[idx].clone(),
            None => match manager.propose_date_release(today, module) {
                Ok(name) => name,
                Err(e) => {
                    ui.error(&format!("failed to propose release: {}", e));
                    outcomes.push(ModuleOutcome {
                        module: module.clone(),
                        result: Err(e),
                    });
                    continue;
                }
            },
        };

        if let Err(e) = manager.create_tag(&name, &args.message, identity) {
            ui.error(&format!("failed to create tag {}: {}", name, e));
            outcomes.push(ModuleOutcome {
                module: module.clone(),
                result: Err(e),
            });
            continue;
        }
        println!("created release: {}", name);

        let state = if args.push {
            match manager.push_tag(&name, &settings.remote, &auth) {
                Ok(status) => {
                    println!("{}", status);
                    ReleaseState::Pushed
                }
                Err(e) => {
                    ui.error(&e.to_string());
                    println!("{}", push_recovery_hint(&name, &settings.remote));
                    ReleaseState::PushFailed {
                        reason: e.to_string(),
                    }
                }
            }
        } else {
            ReleaseState::Created
        };

        outcomes.push(ModuleOutcome {
            module: module.clone(),
            result: Ok(ReleaseReport { tag: name, state }),
        });
    }

    let created: Vec<String> = outcomes
        .iter()
        .filter_map(|outcome| match &outcome.result {
            Ok(report) if report.state == ReleaseState::Created => Some(report.tag.clone()),
            _ => None,
        })
        .collect();

    if !args.push && !created.is_empty() && !outcomes.iter().any(|o| o.failed()) {
        println!("{}", manual_push_hint(&created, &settings.remote));
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_modules_from_flags_and_positionals() {
        let args = parse(&["git-release", "-c", "api", "web", "worker"]);
        assert_eq!(args.modules(), vec!["api", "web", "worker"]);
    }

    #[test]
    fn test_no_modules_means_one_unnamed_release() {
        let args = parse(&["git-release"]);
        assert_eq!(args.modules(), vec![String::new()]);
    }

    #[test]
    fn test_flag_defaults() {
        let args = parse(&["git-release"]);
        assert!(!args.push);
        assert!(!args.dry_run);
        assert!(!args.semver);
        assert_eq!(args.message, "");
        assert_eq!(args.remote, None);
    }

    #[test]
    fn test_settings_flag_beats_file() {
        let args = parse(&["git-release", "-r", "upstream"]);
        let file = FileConfig {
            remote: Some("backup".to_string()),
            ..FileConfig::default()
        };

        let settings = Settings::resolve(&args, &file);
        assert_eq!(settings.remote, "upstream");
    }

    #[test]
    fn test_settings_file_beats_default() {
        let args = parse(&["git-release"]);
        let file = FileConfig {
            remote: Some("backup".to_string()),
            ssh_key: Some(PathBuf::from("/tmp/ci_key")),
            ..FileConfig::default()
        };

        let settings = Settings::resolve(&args, &file);
        assert_eq!(settings.remote, "backup");
        assert_eq!(settings.ssh_key, PathBuf::from("/tmp/ci_key"));
    }

    #[test]
    fn test_settings_defaults() {
        let args = parse(&["git-release"]);
        let settings = Settings::resolve(&args, &FileConfig::default());

        assert_eq!(settings.remote, "origin");
        assert!(settings.ssh_key.ends_with(".ssh/id_rsa"));
        assert_eq!(settings.primary_branches, vec!["main", "master"]);
        assert!(settings.include_number);
    }

    #[test]
    fn test_outcome_failed_states() {
        let ok = ModuleOutcome {
            module: String::new(),
            result: Ok(ReleaseReport {
                tag: "2024.01.001".to_string(),
                state: ReleaseState::Created,
            }),
        };
        let push_failed = ModuleOutcome {
            module: String::new(),
            result: Ok(ReleaseReport {
                tag: "2024.01.002".to_string(),
                state: ReleaseState::PushFailed {
                    reason: "timeout".to_string(),
                },
            }),
        };
        let create_failed = ModuleOutcome {
            module: String::new(),
            result: Err(ReleaseError::TagAlreadyExists {
                name: "2024.01.003".to_string(),
            }),
        };

        assert!(!ok.failed());
        assert!(push_failed.failed());
        assert!(create_failed.failed());
    }
}
