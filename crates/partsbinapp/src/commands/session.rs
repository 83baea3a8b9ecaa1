use crate::auth::AdminAuth;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CatalogError, Result};
use crate::state::KeyValueStore;

pub fn login<K: KeyValueStore>(
    auth: &mut AdminAuth<K>,
    username: &str,
    password: &str,
) -> Result<CmdResult> {
    if !auth.login(username, password)? {
        return Err(CatalogError::Unauthorized(
            "invalid username or password".to_string(),
        ));
    }
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Logged in as {}", username)));
    Ok(result)
}

pub fn logout<K: KeyValueStore>(auth: &mut AdminAuth<K>) -> Result<CmdResult> {
    let was_admin = auth.is_admin()?;
    auth.logout()?;
    let mut result = CmdResult::default();
    if was_admin {
        result.add_message(CmdMessage::success("Logged out"));
    } else {
        result.add_message(CmdMessage::info("Not logged in"));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::commands::MessageLevel;
    use crate::state::memory::MemoryKv;

    #[test]
    fn bad_login_is_unauthorized() {
        let mut auth = AdminAuth::new(MemoryKv::new(), Credentials::default());
        assert!(matches!(
            login(&mut auth, "admin", "wrong"),
            Err(CatalogError::Unauthorized(_))
        ));
    }

    #[test]
    fn login_then_logout() {
        let mut auth = AdminAuth::new(MemoryKv::new(), Credentials::default());
        let result = login(&mut auth, "admin", "admin123").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);

        let result = logout(&mut auth).unwrap();
        assert_eq!(result.messages[0].content, "Logged out");
        let result = logout(&mut auth).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }
}
