use figment::Jail;

/// Point the user config directory into the jail so a developer's own
/// `~/.config/keel/config.toml` never takes part.
pub fn isolate_user_config(jail: &mut Jail) {
    let dir = jail.directory().to_path_buf();
    jail.set_env("HOME", dir.display());
    jail.set_env("XDG_CONFIG_HOME", dir.join(".config").display());
}
