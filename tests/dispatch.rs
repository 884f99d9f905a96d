// tests/dispatch.rs
//! Integration tests for command dispatch: access and argument gates,
//! say-subcommand routing, login, listings and console routing.

mod common;
use common::{TestServer, args};
use qadmin::{Access, Credential, MatchKind, SessionId, Verdict};

#[test]
fn test_unknown_command_passes_through() {
    let mut server = TestServer::new();
    let player = server.connect(1, "10.0.0.2", "Player");

    assert_eq!(server.cmd(player, "kill"), Verdict::Ignored);
    assert_eq!(server.console("status"), Verdict::Suppressed);
    assert!(server.admin.host().calls.is_empty());
}

#[test]
fn test_no_access_is_reported_and_suppressed() {
    let mut server = TestServer::new();
    let player = server.connect(1, "10.0.0.2", "Player");

    assert_eq!(server.cmd(player, "ADMIN_KICK someone"), Verdict::Suppressed);
    assert_eq!(
        server.texts(player),
        vec!["[QADMIN] You do not have access to that command: 'admin_kick'"]
    );
    assert!(server.kicked().is_empty());
}

#[test]
fn test_missing_arguments_show_usage() {
    let mut server = TestServer::new();

    assert_eq!(server.console("admin_psay bob"), Verdict::Suppressed);
    assert_eq!(
        server.texts(SessionId::CONSOLE),
        vec!["[QADMIN] Missing parameters, usage: admin_psay <name> <text>"]
    );
}

#[test]
fn test_unknown_session_has_no_access() {
    let mut server = TestServer::new();
    assert_eq!(server.cmd(SessionId(9), "admin_currentmap"), Verdict::Suppressed);
    assert_eq!(
        server.texts(SessionId(9)),
        vec!["[QADMIN] You do not have access to that command: 'admin_currentmap'"]
    );
}

#[test]
fn test_say_routing() {
    let mut server = TestServer::new();
    server.host().cvars.insert("mapname".into(), "q3dm17".into());
    let player = server.connect(1, "10.0.0.2", "Player");

    // Plain chat and an empty say pass through to the engine.
    assert_eq!(server.cmd(player, "say hello there"), Verdict::Ignored);
    assert_eq!(server.cmd(player, "say"), Verdict::Ignored);
    assert!(server.admin.host().calls.is_empty());

    // A say-subcommand answers everyone and still lets the chat through.
    assert_eq!(server.cmd(player, "say currentmap"), Verdict::Ignored);
    assert_eq!(server.broadcasts(), vec!["[QADMIN] The current map is: q3dm17"]);

    // The whole chat text may arrive as one argument.
    server.host().clear();
    assert_eq!(server.cmd(player, r#"say "currentmap""#), Verdict::Ignored);
    assert_eq!(server.broadcasts().len(), 1);
}

#[test]
fn test_say_subcommand_without_access_is_suppressed() {
    let mut server = TestServer::from_toml("[admin]\ndefault_access = 0\n");
    let player = server.connect(1, "10.0.0.2", "Player");

    assert_eq!(server.cmd(player, "say castvote 1"), Verdict::Suppressed);
    assert_eq!(
        server.texts(player),
        vec!["[QADMIN] You do not have access to that command: 'castvote'"]
    );
}

#[test]
fn test_say_subcommand_with_too_few_arguments_passes_through() {
    let mut server = TestServer::new();
    let player = server.connect(1, "10.0.0.2", "Player");

    assert_eq!(server.cmd(player, "say admin_login"), Verdict::Ignored);
    assert!(server.admin.host().calls.is_empty());
}

#[test]
fn test_login_by_name_grants_access() {
    let mut server = TestServer::new();
    server
        .admin
        .add_user(Credential::new(MatchKind::Name, "Admin", "Secret", Access::LEVEL_128))
        .unwrap();
    let admin = server.connect(1, "10.0.0.2", "admin");

    // Wrong password: logged, not answered.
    assert_eq!(server.cmd(admin, "admin_login nope"), Verdict::Suppressed);
    assert!(server.texts(admin).is_empty());

    // Through say, passwords compare case-insensitively.
    assert_eq!(server.cmd(admin, "say admin_login secret"), Verdict::Suppressed);
    assert_eq!(
        server.texts(admin),
        vec!["[QADMIN] You have successfully authenticated. You now have 128 access."]
    );
    let record = server.admin.state().players.get(admin).unwrap();
    assert!(record.authed);
    assert_eq!(record.access, Access::LEVEL_128);

    server.cmd(admin, "admin_login secret");
    assert_eq!(
        server.last_text(admin).as_deref(),
        Some("[QADMIN] Trying to login multiple times, eh?")
    );
}

#[test]
fn test_login_first_registered_credential_wins() {
    let mut server = TestServer::new();
    server
        .admin
        .add_user(Credential::new(MatchKind::Ip, "10.0.0.2", "pw", Access::LEVEL_2))
        .unwrap();
    server
        .admin
        .add_user(Credential::new(MatchKind::Name, "Player", "pw", Access::LEVEL_4))
        .unwrap();
    let player = server.connect(1, "10.0.0.2:1234", "Player");

    server.cmd(player, "admin_login pw");
    assert_eq!(server.admin.state().players.get(player).unwrap().access, Access::LEVEL_2);
}

#[test]
fn test_console_cannot_login_or_vote() {
    let mut server = TestServer::new();
    server.console("admin_login pw");
    server.console("castvote 1");
    assert_eq!(
        server.texts(SessionId::CONSOLE),
        vec![
            "[QADMIN] Trying to login from the server console, eh?",
            "[QADMIN] Trying to vote from the server console, eh?",
        ]
    );
}

#[test]
fn test_reconnect_resets_login() {
    let mut server = TestServer::new();
    let player = server.connect(1, "10.0.0.2", "Player");
    server.grant(player, Access::LEVEL_128);
    server.admin.state_mut().players.get_mut(player).unwrap().authed = true;

    server.connect(1, "10.0.0.2", "Player");
    let record = server.admin.state().players.get(player).unwrap();
    assert!(!record.authed);
    assert_eq!(record.access, Access::LEVEL_1);
}

#[test]
fn test_help_lists_only_accessible_commands() {
    let mut server = TestServer::new();
    let player = server.connect(1, "10.0.0.2", "Player");

    server.cmd(player, "admin_help");
    let texts = server.texts(player);
    assert_eq!(texts[0], "[QADMIN] admin_help listing for 1-10");
    assert_eq!(texts[1], "[QADMIN] 1. admin_currentmap - Displays current map");
    assert!(texts.iter().all(|t| !t.contains("admin_kick")));
    assert!(texts.len() <= 11);

    server.host().clear();
    server.cmd(player, "admin_help 500");
    assert_eq!(server.texts(player)[0], "[QADMIN] admin_help listing for 1-10");
}

#[test]
fn test_userlist_shows_ip_only_to_ban_access() {
    let mut server = TestServer::new();
    let player = server.connect(1, "10.0.0.2:27960", "Player");
    server.connect(4, "10.0.0.5", "Other");

    server.cmd(player, "admin_userlist oth");
    assert_eq!(
        server.texts(player),
        vec![
            "[QADMIN] Listing users matching 'oth'...",
            "[QADMIN] Slot Access   Authed Name",
            "[QADMIN]   4: 1        no     Other",
        ]
    );

    server.host().clear();
    server.console("admin_userlist");
    let texts = server.texts(SessionId::CONSOLE);
    assert_eq!(texts[1], "[QADMIN] Slot Access   Authed IP              Name");
    assert_eq!(texts[2], "[QADMIN]   1: 1        no     10.0.0.2        Player");
    assert_eq!(texts.len(), 4);
}

#[test]
fn test_messaging() {
    let mut server = TestServer::new();
    let admin = server.connect(0, "10.0.0.1", "Admin");
    server.grant(admin, Access::LEVEL_64);
    let player = server.connect(1, "10.0.0.2", "Player");

    server.cmd(admin, "admin_chat meet; now");
    assert_eq!(server.texts(admin), vec!["To Admins From Admin: meet  now"]);
    assert!(server.texts(player).is_empty());

    server.cmd(admin, "admin_psay play psst");
    assert_eq!(server.last_text(admin).as_deref(), Some("Private Message To Player: psst"));
    assert_eq!(server.texts(player), vec!["Private Message From Admin: psst"]);

    server.cmd(admin, "admin_say hello all");
    server.cmd(admin, "admin_csay centre");
    assert_eq!(server.broadcasts(), vec!["hello all", "centre"]);
}

#[test]
fn test_server_commands_emit_sanitized_console_lines() {
    let mut server = TestServer::new();
    server.host().maps = Some(vec!["q3dm17".into()]);

    server.console("admin_hostname My \"Cool\" Server");
    server.console("admin_pass secret");
    server.console("admin_nopass");
    server.console("admin_cfg ffa.cfg;quit");
    server.console("admin_map q3dm17");
    server.console("admin_map nowhere");
    server.console("admin_rcon g_speed 400;quit");

    assert_eq!(
        server.console_lines(),
        vec![
            "set sv_hostname \"My Cool Server\"",
            "set g_password \"secret\"",
            "set g_needpass \"1\"",
            "set g_password \"\"",
            "set g_needpass \"0\"",
            "exec \"ffa.cfg quit\"",
            "map \"q3dm17\"",
            "g_speed 400 quit",
        ]
    );
    assert_eq!(
        server.texts(SessionId::CONSOLE),
        vec!["[QADMIN] Unknown map 'nowhere'"]
    );
}

#[test]
fn test_listmaps() {
    let mut server = TestServer::new();
    server.console("admin_listmaps");
    assert_eq!(
        server.texts(SessionId::CONSOLE),
        vec!["[QADMIN] Map listing is not available on this server"]
    );

    server.host().clear();
    server.host().maps = Some(vec!["q3dm1".into(), "q3dm17".into()]);
    server.console("admin_listmaps");
    assert_eq!(
        server.texts(SessionId::CONSOLE),
        vec!["[QADMIN] Listing maps...", "q3dm1", "q3dm17", "[QADMIN] End of maps list"]
    );
}

#[test]
fn test_timeleft() {
    let mut server = TestServer::new();
    let player = server.connect(1, "10.0.0.2", "Player");

    server.cmd(player, "admin_timeleft");
    assert_eq!(server.last_text(player).as_deref(), Some("[QADMIN] There is no time limit."));

    server.host().cvars.insert("timelimit".into(), "10".into());
    server.admin.on_map_start(std::time::Duration::from_secs(100));
    server.tick(100 + 125);
    server.cmd(player, "admin_timeleft");
    assert_eq!(
        server.last_text(player).as_deref(),
        Some("[QADMIN] Time remaining: 7 minute(s) 55 second(s)")
    );

    server.tick(100 + 600);
    server.cmd(player, "admin_timeleft");
    assert_eq!(server.last_text(player).as_deref(), Some("[QADMIN] Time limit has been reached"));
}

#[test]
fn test_console_aliases_and_adduser() {
    let mut server = TestServer::new();
    let player = server.connect(1, "10.0.0.2", "Player");

    assert_eq!(server.admin.on_console_command(&args("a_c admin_kick player")), Verdict::Suppressed);
    assert_eq!(server.kicked(), vec![player]);
    server.host().clear();

    assert_eq!(
        server.admin.on_console_command(&args("admin_adduser_name Boss pw 1024")),
        Verdict::Suppressed
    );
    assert_eq!(
        server.admin.on_console_command(&args("admin_adduser_name boss other 1")),
        Verdict::Suppressed
    );
    assert_eq!(server.admin.state().users.len(), 1);
    assert!(server.texts(SessionId::CONSOLE).is_empty());

    server.admin.on_console_command(&args("admin_adduser_id X"));
    assert_eq!(
        server.texts(SessionId::CONSOLE),
        vec!["[QADMIN] Usage: admin_adduser_id <user> <pass> <access>"]
    );

    assert_eq!(server.admin.on_console_command(&args("status")), Verdict::Ignored);
    assert_eq!(server.admin.on_console_command(&args("admin_adduser_foo a b 1")), Verdict::Ignored);
}

#[test]
fn test_command_overrides_from_config() {
    let toml = r#"
[[command]]
name = "admin_kick"
access = 2

[[command]]
name = "kick"
handler = "admin_kick"
table = "say"
access = 2

[[command]]
name = "admin_rcon"
disabled = true
"#;
    let mut server = TestServer::from_toml(toml);
    let mod_ = server.connect(0, "10.0.0.1", "Mod");
    server.grant(mod_, Access::LEVEL_2);
    let victim = server.connect(1, "10.0.0.2", "Victim");

    assert_eq!(server.cmd(mod_, "say kick victim"), Verdict::Suppressed);
    assert_eq!(server.kicked(), vec![victim]);
    assert_eq!(server.console("admin_rcon quit"), Verdict::Suppressed);
    assert!(server.console_lines().is_empty());
}

#[test]
fn test_reload_repopulates_from_config() {
    let toml = r#"
[admin]
gagged_commands = "tell, vsay"
config_file = "qadmin.cfg"

[[user]]
kind = "id"
user = "GUID1"
password = "pw"
access = 4
"#;
    let mut server = TestServer::from_toml(toml);
    server
        .admin
        .add_user(Credential::new(MatchKind::Name, "Temp", "pw", Access::LEVEL_2))
        .unwrap();
    assert_eq!(server.admin.state().users.len(), 2);

    server.console("admin_reload");

    assert_eq!(server.admin.state().users.len(), 1);
    assert_eq!(server.admin.state().gagged_commands, vec!["tell", "vsay"]);
    assert_eq!(server.console_lines(), vec!["exec \"qadmin.cfg\""]);
}
