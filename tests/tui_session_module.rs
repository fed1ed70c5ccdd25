use collection_wizard::catalog::{ArtifactType, CatalogDispatcher, ItemDescriptor, MemoryCatalog, ParamSpec};
use collection_wizard::shared::logging::{wizard_log_path, WizardLog};
use collection_wizard::tui::navigation::parse_scripted_wizard_keys;
use collection_wizard::tui::session::{run_scripted, SessionExit, WizardSession};
use collection_wizard::wizard::{BaseFlow, EnvEntry, Request, RequestParameters, WizardController};
use std::fs;
use std::sync::Arc;

fn catalog_items() -> Vec<ItemDescriptor> {
    vec![
        ItemDescriptor {
            description: Some("Collect basic client information.".to_string()),
            ..ItemDescriptor::named("Generic.Client.Info")
        },
        ItemDescriptor::named("Windows.Sys.Users").with_parameters(vec![
            ParamSpec {
                default: Some("N".to_string()),
                param_type: Some("bool".to_string()),
                ..ParamSpec::named("Remote")
            },
            ParamSpec {
                default: Some(".".to_string()),
                ..ParamSpec::named("UserRegex")
            },
        ]),
    ]
}

fn session_with(base_flow: Option<BaseFlow>, log: WizardLog) -> (WizardSession, CatalogDispatcher) {
    let dispatcher = CatalogDispatcher::new(Arc::new(MemoryCatalog::new(catalog_items())));
    let session = WizardSession::new(WizardController::new(base_flow), ArtifactType::Client, log);
    (session, dispatcher)
}

fn run(session: &mut WizardSession, dispatcher: &mut CatalogDispatcher, script: &str) -> Result<SessionExit, String> {
    let steps = parse_scripted_wizard_keys(script).expect("parse script");
    run_scripted(session, dispatcher, steps)
}

#[test]
fn tui_session_module_scripted_run_builds_and_launches_request() {
    let (mut session, mut dispatcher) = session_with(None, WizardLog::disabled());
    let exit = run(
        &mut session,
        &mut dispatcher,
        "down,space,right,down,space,down,text=admin,enter,right,down,text=300,enter,right,enter",
    )
    .expect("scripted run");

    let SessionExit::Launched(request) = exit else {
        panic!("expected launch, got {exit:?}");
    };
    assert_eq!(request.artifacts, vec!["Windows.Sys.Users".to_string()]);
    assert_eq!(
        request.parameters.env,
        vec![
            EnvEntry {
                key: "Remote".to_string(),
                value: "Y".to_string(),
            },
            EnvEntry {
                key: "UserRegex".to_string(),
                value: "admin".to_string(),
            },
        ]
    );
    assert_eq!(request.timeout, Some(300));
    assert_eq!(request.ops_per_second, None);
    assert_eq!(request.max_upload_bytes, None);
}

#[test]
fn tui_session_module_filter_narrows_matches_before_selection() {
    let (mut session, mut dispatcher) = session_with(None, WizardLog::disabled());
    let exit = run(&mut session, &mut dispatcher, "text=users,/,space,esc").expect("scripted run");

    assert_eq!(exit, SessionExit::Cancelled);
    assert_eq!(session.search().filter, "users");
    assert_eq!(session.search().matching.len(), 1);
    assert_eq!(session.controller().selection().len(), 1);
    assert_eq!(session.controller().selection()[0].name, "Windows.Sys.Users");
}

#[test]
fn tui_session_module_hydrates_edit_mode_from_base_flow() {
    let base = BaseFlow::from_request(Request {
        artifacts: vec!["Generic.Client.Info".to_string()],
        parameters: RequestParameters {
            env: vec![EnvEntry {
                key: "Remote".to_string(),
                value: "Y".to_string(),
            }],
        },
        ops_per_second: Some(50),
        ..Request::default()
    });
    let (mut session, mut dispatcher) = session_with(Some(base), WizardLog::disabled());
    let exit = run(&mut session, &mut dispatcher, "right,right,right,enter").expect("scripted run");

    let SessionExit::Launched(request) = exit else {
        panic!("expected launch, got {exit:?}");
    };
    assert_eq!(request.artifacts, vec!["Generic.Client.Info".to_string()]);
    assert_eq!(request.parameter_map().get("Remote"), Some("Y"));
    assert_eq!(request.ops_per_second, Some(50));
}

#[test]
fn tui_session_module_blocks_leaving_select_without_artifacts() {
    let (mut session, mut dispatcher) = session_with(None, WizardLog::disabled());
    let exit = run(&mut session, &mut dispatcher, "right,5,esc").expect("scripted run");

    assert_eq!(exit, SessionExit::Cancelled);
    assert!(session.status_text().contains("select at least one artifact"));
}

#[test]
fn tui_session_module_reports_unterminated_and_unanswered_scripts() {
    let (mut session, mut dispatcher) = session_with(None, WizardLog::disabled());
    let err = run(&mut session, &mut dispatcher, "down").expect_err("no terminal key");
    assert!(err.contains("did not terminate"), "unexpected error: {err}");

    let (mut session, mut dispatcher) = session_with(None, WizardLog::disabled());
    let err = run(&mut session, &mut dispatcher, "/").expect_err("no queued text");
    assert!(err.contains("text="), "unexpected error: {err}");
}

#[test]
fn tui_session_module_logs_launch_events() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (mut session, mut dispatcher) = session_with(None, WizardLog::new(temp.path()));
    run(&mut session, &mut dispatcher, "space,4,enter").expect("scripted run");

    let log = fs::read_to_string(wizard_log_path(temp.path())).expect("read log");
    let events = log
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("json line");
            value["event"].as_str().unwrap_or_default().to_string()
        })
        .collect::<Vec<_>>();
    assert!(events.contains(&"wizard_open".to_string()), "{events:?}");
    assert!(events.contains(&"launch".to_string()), "{events:?}");
}

#[test]
fn tui_session_module_bool_toggle_alternates_between_yes_and_empty() {
    let (mut session, mut dispatcher) = session_with(None, WizardLog::disabled());
    let exit = run(
        &mut session,
        &mut dispatcher,
        "down,space,right,down,space,space,4,enter",
    )
    .expect("scripted run");

    let SessionExit::Launched(request) = exit else {
        panic!("expected launch, got {exit:?}");
    };
    assert_eq!(
        request.parameters.env,
        vec![EnvEntry {
            key: "Remote".to_string(),
            value: String::new(),
        }]
    );
}

#[test]
fn tui_session_module_logs_blocked_navigation_with_action_name() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (mut session, mut dispatcher) = session_with(None, WizardLog::new(temp.path()));
    run(&mut session, &mut dispatcher, "right,esc").expect("scripted run");

    let log = fs::read_to_string(wizard_log_path(temp.path())).expect("read log");
    let blocked = log
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).expect("json line"))
        .find(|value| value["event"] == "navigation_blocked")
        .expect("navigation_blocked event");
    let message = blocked["message"].as_str().unwrap_or_default();
    assert!(message.starts_with("action=next_step "), "{message}");
}
