#![cfg(unix)]

use std::{
    fs,
    os::unix::fs::PermissionsExt as _,
    path::{Path, PathBuf},
};

use launchplan::{build_launch_plan, export_script, ConfiguredRunner, ContextEnv, EnvMap, LaunchConfig};

fn fake_tool(dir: &Path, name: &str) {
    let p = dir.join(name);
    fs::write(&p, "#!/bin/sh\nexec \"$@\"\n").unwrap();
    fs::set_permissions(&p, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn config_file_to_executable_script() {
    let root = tempfile::tempdir().unwrap();
    let bin = root.path().join("bin");
    fs::create_dir(&bin).unwrap();
    fake_tool(&bin, "mangohud");

    let cfg_path = root.path().join("config.toml");
    fs::write(root.path().join("runner.env"), "DXVK_ASYNC=1\n").unwrap();
    fs::write(
        &cfg_path,
        r#"
[system]
mangohud = "on"
fps_limit = "60"
prefix_command = "$GAME_WRAPPER --quiet"

[runner]
env_file = "{config_dir}/runner.env"
[runner.env]
WINEPREFIX = "/pfx"

[game]
command = ["/games/doom/doom", "-nosound"]
ld_library_path = "/games/doom/lib"
"#,
    )
    .unwrap();

    let mut vars = EnvMap::new();
    vars.insert("PATH".to_string(), bin.display().to_string());
    vars.insert("GAME_WRAPPER".to_string(), "/opt/wrap".to_string());
    let mut ctx = ContextEnv::from_parts(vars, PathBuf::from("/home/player"));
    ctx.locate_config(Some(&cfg_path)).unwrap();

    let cfg = LaunchConfig::load_from_path(&cfg_path).unwrap();
    let runner = ConfiguredRunner::build(&ctx, &cfg).unwrap();

    let plan = build_launch_plan(&runner, &cfg.game, &ctx).unwrap();
    assert_eq!(
        plan.argv,
        vec!["/opt/wrap", "--quiet", "mangohud", "/games/doom/doom", "-nosound"]
    );
    assert_eq!(plan.env.get("DXVK_ASYNC").map(String::as_str), Some("1"));
    assert_eq!(
        plan.env.get("LD_LIBRARY_PATH").map(String::as_str),
        Some("/games/doom/lib:$LD_LIBRARY_PATH")
    );

    let script = root.path().join("doom.sh");
    export_script(&runner, &cfg.game, &ctx, &script).unwrap();

    let text = fs::read_to_string(&script).unwrap();
    assert!(text.starts_with("#!/bin/bash\n\n\n# Environment variables\n\n"));
    assert!(text.contains("export TERM=\"xterm\"\n"));
    assert!(text.contains("export WINEPREFIX=\"/pfx\"\n"));
    assert!(text.ends_with("# Command\n\n'/opt/wrap --quiet mangohud /games/doom/doom -nosound'"));

    let mode = fs::metadata(&script).unwrap().permissions().mode();
    assert_ne!(mode & 0o100, 0);
}
