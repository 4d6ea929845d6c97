//! Turn runner settings and a gameplay payload into a launch plan.
//!
//! Wrappers are applied innermost first: every stage prepends in front of
//! what is already assembled, so the last stage ends up outermost.

use crate::{
    config::{EnvMap, GameplayPayload, GpuSwitch, RuntimeSettings},
    error::{LaunchError, Result},
    host::{Host, GAMEMODE_LIB},
    resolve::expand_vars,
};

/// Supplies the per-run settings and the base environment of a runner.
pub trait Runner {
    fn system_config(&self) -> &RuntimeSettings;
    fn base_env(&self) -> EnvMap;
}

/// Resolved argv + environment, ready to exec or export.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct LaunchPlan {
    pub argv: Vec<String>,
    pub env: EnvMap,
}

struct GpuSwitchRule {
    mode: GpuSwitch,
    tool: &'static str,
    prefix: &'static [&'static str],
}

/// First rule whose mode is selected and whose tool exists wins.
const GPU_SWITCHES: &[GpuSwitchRule] = &[
    GpuSwitchRule {
        mode: GpuSwitch::Primusrun,
        tool: "primusrun",
        prefix: &["primusrun"],
    },
    GpuSwitchRule {
        mode: GpuSwitch::Optirun,
        tool: "optirun",
        prefix: &["optirun", "-b", "virtualgl"],
    },
    GpuSwitchRule {
        mode: GpuSwitch::Pvkrun,
        tool: "pvkrun",
        prefix: &["pvkrun"],
    },
];

type Wrapper = fn(&RuntimeSettings, &dyn Host, &mut Vec<String>) -> Result<()>;

const WRAPPERS: &[(&str, Wrapper)] = &[
    ("gpu switch", wrap_gpu_switch),
    ("mangohud", wrap_mangohud),
    ("fps limit", wrap_fps_limit),
    ("prefix command", wrap_prefix_command),
    ("single cpu", wrap_single_cpu),
];

type EnvStep = fn(&GameplayPayload, &mut EnvMap);

/// Applied in order on top of the runner's base env.
const ENV_STEPS: &[EnvStep] = &[merge_payload_env, set_ld_preload, prepend_ld_library_path];

pub fn build_launch_plan(
    runner: &dyn Runner,
    payload: &GameplayPayload,
    host: &dyn Host,
) -> Result<LaunchPlan> {
    let settings = runner.system_config();
    let mut argv = payload.command.clone();

    for (name, wrap) in WRAPPERS {
        wrap(settings, host, &mut argv)?;
        tracing::trace!(stage = *name, ?argv, "applied wrapper stage");
    }

    let mut env = runner.base_env();
    for step in ENV_STEPS {
        step(payload, &mut env);
    }

    apply_gamemode(settings, host, &mut argv, &mut env);

    tracing::debug!(?argv, env_vars = env.len(), "launch plan resolved");
    Ok(LaunchPlan { argv, env })
}

// -------------------- argv stages --------------------

fn prepend<S: AsRef<str>>(argv: &mut Vec<String>, prefix: &[S]) {
    argv.splice(0..0, prefix.iter().map(|s| s.as_ref().to_string()));
}

fn wrap_gpu_switch(settings: &RuntimeSettings, host: &dyn Host, argv: &mut Vec<String>) -> Result<()> {
    let rule = GPU_SWITCHES
        .iter()
        .find(|r| r.mode == settings.optimus && host.find_executable(r.tool).is_some());

    if let Some(rule) = rule {
        prepend(argv, rule.prefix);
    }
    Ok(())
}

fn wrap_mangohud(settings: &RuntimeSettings, host: &dyn Host, argv: &mut Vec<String>) -> Result<()> {
    if !settings.mangohud.is_empty() && host.find_executable("mangohud").is_some() {
        prepend(argv, &["mangohud"]);
    }
    Ok(())
}

fn wrap_fps_limit(settings: &RuntimeSettings, host: &dyn Host, argv: &mut Vec<String>) -> Result<()> {
    let limit = settings.fps_limit.as_str();
    if limit.is_empty() {
        return Ok(());
    }

    match host.find_executable("strangle") {
        Some(strangle) => match strangle.to_str() {
            Some(strangle) => prepend(argv, &[strangle, limit]),
            None => tracing::warn!(
                path = %strangle.display(),
                "strangle path is not valid UTF-8, FPS limiter disabled"
            ),
        },
        None => tracing::warn!("libstrangle is not available on this system, FPS limiter disabled"),
    }
    Ok(())
}

fn wrap_prefix_command(settings: &RuntimeSettings, host: &dyn Host, argv: &mut Vec<String>) -> Result<()> {
    let raw = settings.prefix_command.as_str();
    if raw.is_empty() {
        return Ok(());
    }

    let expanded = expand_vars(raw, |name| host.var(name));
    let words = shlex::split(&escape_comment_marks(&expanded))
        .ok_or_else(|| LaunchError::Config(format!("cannot parse prefix command: {raw:?}")))?;

    prepend(argv, &words);
    Ok(())
}

/// `shlex` drops everything from a word-leading `#` onwards. Prefix commands
/// have no comments, so escape those marks and keep them as literal text.
fn escape_comment_marks(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut quote: Option<char> = None;
    let mut word_start = true;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some('\'') => {
                if c == '\'' {
                    quote = None;
                }
                out.push(c);
            }
            Some(_) => {
                out.push(c);
                if c == '\\' {
                    out.extend(chars.next());
                } else if c == '"' {
                    quote = None;
                }
            }
            None => {
                match c {
                    '#' if word_start => out.push_str("\\#"),
                    '\\' => {
                        out.push(c);
                        out.extend(chars.next());
                    }
                    '\'' | '"' => {
                        quote = Some(c);
                        out.push(c);
                    }
                    _ => out.push(c),
                }
                word_start = matches!(c, ' ' | '\t' | '\n');
            }
        }
    }
    out
}

fn wrap_single_cpu(settings: &RuntimeSettings, _host: &dyn Host, argv: &mut Vec<String>) -> Result<()> {
    if settings.single_cpu {
        tracing::info!("The game will run on a single CPU core");
        prepend(argv, &["taskset", "-c", "0"]);
    }
    Ok(())
}

// -------------------- env steps --------------------

fn merge_payload_env(payload: &GameplayPayload, env: &mut EnvMap) {
    if let Some(extra) = &payload.env {
        env.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

fn set_ld_preload(payload: &GameplayPayload, env: &mut EnvMap) {
    if let Some(preload) = payload.ld_preload.as_deref().filter(|s| !s.is_empty()) {
        env.insert("LD_PRELOAD".to_string(), preload.to_string());
    }
}

fn prepend_ld_library_path(payload: &GameplayPayload, env: &mut EnvMap) {
    let Some(game_path) = payload.ld_library_path.as_deref().filter(|s| !s.is_empty()) else {
        return;
    };

    // Left for the shell to expand at exec time.
    let prior = env
        .get("LD_LIBRARY_PATH")
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("$LD_LIBRARY_PATH");

    let joined = format!("{game_path}:{prior}");
    env.insert("LD_LIBRARY_PATH".to_string(), joined);
}

// -------------------- gamemode --------------------

fn apply_gamemode(settings: &RuntimeSettings, host: &dyn Host, argv: &mut Vec<String>, env: &mut EnvMap) {
    if !settings.gamemode {
        return;
    }
    if !host.gamemode_active() {
        tracing::debug!("gamemode requested but not available");
        return;
    }

    if host.find_executable("gamemoderun").is_some() {
        prepend(argv, &["gamemoderun"]);
        return;
    }

    let preload = [env.get("LD_PRELOAD").map(String::as_str), Some(GAMEMODE_LIB)]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(":");
    env.insert("LD_PRELOAD".to_string(), preload);
}
