//! API key management handlers.

use super::commands::KeyCommands;
use storyloom::{
    ConfigError, CredentialResolver, CredentialStore, FileCredentialStore, StoryloomConfig,
    StoryloomResult,
};

/// Handle key management commands.
pub fn handle_key_command(config: &StoryloomConfig, cmd: KeyCommands) -> StoryloomResult<()> {
    match cmd {
        KeyCommands::Set { value } => set_key(config, &value),
        KeyCommands::Clear => clear_key(config),
        KeyCommands::Status => key_status(config),
    }
}

fn open_store(config: &StoryloomConfig) -> StoryloomResult<FileCredentialStore> {
    let path = config
        .credential_store_path()
        .ok_or_else(|| ConfigError::new("No credential store path: set credentials.store_path"))?;
    Ok(FileCredentialStore::new(path))
}

fn set_key(config: &StoryloomConfig, value: &str) -> StoryloomResult<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::new("API key must not be empty").into());
    }

    let store = open_store(config)?;
    store.set(&config.credentials.store_key, value)?;
    println!("Stored API key in {}", store.path().display());
    Ok(())
}

fn clear_key(config: &StoryloomConfig) -> StoryloomResult<()> {
    let store = open_store(config)?;
    store.remove(&config.credentials.store_key)?;
    println!("Removed stored API key from {}", store.path().display());
    Ok(())
}

fn key_status(config: &StoryloomConfig) -> StoryloomResult<()> {
    let resolver = CredentialResolver::from_config(config);
    match resolver.resolve_with_source() {
        Ok((key, source)) => {
            println!("API key: {}", mask(&key));
            println!("Source: {}", source);
        }
        Err(e) if e.is_missing_credential() => {
            println!("No API key found. Searched: {}", resolver.describe_sources());
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Show only the last four characters of a key.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask("AIzaSyExample1234"), "*************1234");
        assert_eq!(mask("short"), "*****");
    }
}
