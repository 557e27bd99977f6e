use teeshack_auth::{AuthService, UserDirectory, USER_SNAPSHOT_KEY};
use teeshack_cache::Cache;

#[test]
fn signed_in_user_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut auth = AuthService::restore(Cache::open_dir(dir.path()).unwrap());
        auth.login("demo@teeshack.com", "123456").unwrap();
    }

    let auth = AuthService::restore(Cache::open_dir(dir.path()).unwrap());
    let user = auth.current_user().expect("restored user");
    assert_eq!(user.email, "demo@teeshack.com");
}

#[test]
fn registered_accounts_are_not_persisted() {
    let cache = Cache::in_memory();
    {
        let mut auth = AuthService::restore(cache.clone());
        auth.register("ana@example.com", "secret", "Ana").unwrap();
        auth.logout().unwrap();
    }

    let mut auth = AuthService::restore(cache.clone());
    assert!(auth.login("ana@example.com", "secret").is_err());
    assert!(!cache.exists(USER_SNAPSHOT_KEY).unwrap());
}

#[test]
fn empty_directory_rejects_everyone() {
    let mut auth = AuthService::with_directory(Cache::in_memory(), UserDirectory::empty());
    assert!(auth.login("demo@teeshack.com", "123456").is_err());
}
