use anyhow::{Context, Result};
use rand::RngCore;
use std::path::PathBuf;

/// Vrací cestu k application data adresáři dle OS
pub fn get_app_dir() -> Result<PathBuf> {
    let base_dir = if cfg!(target_os = "windows") {
        // Windows: %APPDATA%\org-command-center
        let appdata: PathBuf = std::env::var("APPDATA")
            .context("APPDATA environment variable not found")?
            .into();
        appdata.join("org-command-center")
    } else {
        // Linux/macOS: ~/.org-command-center
        let home = std::env::var("HOME").context("HOME environment variable not found")?;
        PathBuf::from(home).join(".org-command-center")
    };

    Ok(base_dir)
}

/// Vrací cestu k data adresáři
pub fn get_data_dir() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("data"))
}

/// Vrací cestu k SQLite databázi
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("org-command-center.db"))
}

fn get_key_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("token.key"))
}

/// Inicializuje adresáře (vytvoří je pokud neexistují)
pub fn init_directories() -> Result<()> {
    let data_dir = get_data_dir()?;

    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
        tracing::info!("Created data directory: {}", data_dir.display());
    }

    Ok(())
}

/// Načte šifrovací klíč pro API tokeny, při prvním spuštění ho vygeneruje
pub fn load_or_create_key() -> Result<Vec<u8>> {
    let key_path = get_key_path()?;

    if key_path.exists() {
        let encoded = std::fs::read_to_string(&key_path).context("Failed to read key file")?;
        let key = hex::decode(encoded.trim()).context("Key file is not valid hex")?;
        return Ok(key);
    }

    let mut key = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut key);

    std::fs::write(&key_path, hex::encode(key)).context("Failed to write key file")?;
    tracing::info!("Generated new encryption key: {}", key_path.display());

    Ok(key.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_path() {
        let app_dir = get_app_dir().unwrap();
        assert!(app_dir.to_string_lossy().contains("org-command-center"));
    }

    #[test]
    fn test_db_path() {
        let db_path = get_db_path().unwrap();
        assert!(db_path.to_string_lossy().ends_with("org-command-center.db"));
    }
}
