use propfolio::{initialize, Config, PropertyRecord, PropfolioError};
use tempfile::tempdir;

fn config(dir: &std::path::Path) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        ..Config::default()
    }
}

#[test]
fn favorites_and_accounts_survive_restart() {
    let tmp = tempdir().unwrap();

    {
        let app = initialize(&config(tmp.path())).unwrap();
        let user = app.accounts.register("kate", "hunter2").unwrap();
        let record = PropertyRecord::new("2077")
            .with_address("12 Oak Street")
            .with_price(500_000.0);
        assert!(app.favorites.toggle_favorite(&user, &record).unwrap());
    }

    let app = initialize(&config(tmp.path())).unwrap();
    let session = app.accounts.login("kate", "hunter2").unwrap();
    let user = session.user().unwrap();

    assert!(app.favorites.is_favorited(Some(user), "2077"));
    let favorites = app.favorites.favorites(user, "oak", None);
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].snapshot.price, Some(500_000.0));
    assert!(favorites[0].date_added.is_some());
}

#[test]
fn failed_commit_leaves_state_unchanged() {
    let tmp = tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    let app = initialize(&config(&data_dir)).unwrap();
    let user = app.accounts.register("kate", "hunter2").unwrap();
    let record = PropertyRecord::new("2077");

    std::fs::remove_dir_all(&data_dir).unwrap();

    let err = app.favorites.toggle_favorite(&user, &record).unwrap_err();
    assert!(matches!(err, PropfolioError::Persistence(_)));
    assert!(!app.favorites.is_favorited(Some(&user), "2077"));
}

#[test]
fn logged_out_session_sees_no_favorites() {
    let tmp = tempdir().unwrap();
    let app = initialize(&config(tmp.path())).unwrap();
    let user = app.accounts.register("kate", "hunter2").unwrap();
    app.favorites.toggle_favorite(&user, &PropertyRecord::new("a")).unwrap();

    let mut session = app.accounts.login("kate", "hunter2").unwrap();
    session.sign_out();

    assert!(!app.favorites.is_favorited(session.user(), "a"));
    assert!(app.favorites.is_favorited(Some(&user), "a"));
}
