use dashboard_core::{update, AppState, HealthStatus, Msg};
use pretty_assertions::assert_eq;

fn started() -> AppState {
    update(
        AppState::new(),
        Msg::Started {
            location: String::new(),
        },
    )
    .0
}

fn probed(state: AppState, service: &'static str, online: bool) -> AppState {
    update(state, Msg::HealthProbed { service, online }).0
}

fn statuses(state: &AppState) -> Vec<(&'static str, HealthStatus)> {
    state
        .view()
        .services
        .iter()
        .map(|service| (service.key, service.status))
        .collect()
}

#[test]
fn every_service_starts_checking() {
    let state = started();
    let view = state.view();

    assert_eq!(
        statuses(&state),
        vec![
            ("graphiti", HealthStatus::Checking),
            ("fastgpt", HealthStatus::Checking),
            ("danswer", HealthStatus::Checking),
        ]
    );
    assert_eq!(view.online_count, 0);
    assert_eq!(view.service_total, 3);
}

#[test]
fn failed_probe_marks_offline_and_count_tracks_online() {
    let state = started();
    let state = probed(state, "graphiti", true);
    let state = probed(state, "fastgpt", false);
    let state = probed(state, "danswer", true);
    let view = state.view();

    assert_eq!(
        statuses(&state),
        vec![
            ("graphiti", HealthStatus::Online),
            ("fastgpt", HealthStatus::Offline),
            ("danswer", HealthStatus::Online),
        ]
    );
    let online = view
        .services
        .iter()
        .filter(|service| service.status == HealthStatus::Online)
        .count();
    assert_eq!(view.online_count, online);
    assert_eq!(view.online_count, 2);
    assert_eq!(HealthStatus::Offline.badge(), "Hors ligne");

    let state = probed(state, "graphiti", false);
    assert_eq!(state.view().online_count, 1);
}

#[test]
fn unknown_service_is_ignored() {
    let mut state = started();
    state.consume_dirty();
    let mut state = probed(state, "mystery", true);

    assert!(!state.consume_dirty());
    assert_eq!(state.view().services.len(), 3);
}

#[test]
fn refresh_requests_a_probe_cycle() {
    let (_state, effects) = update(started(), Msg::HealthRefreshClicked);
    assert_eq!(effects, vec![dashboard_core::Effect::ProbeHealth]);
}

#[test]
fn repeated_probes_keep_one_status_per_service() {
    let mut state = started();
    for online in [true, false, true] {
        state = probed(state, "danswer", online);
        state = probed(state, "mystery", online);
    }
    let view = state.view();

    assert_eq!(view.service_total, 3);
    assert_eq!(view.online_count, 1);
    assert_eq!(statuses(&state)[2], ("danswer", HealthStatus::Online));
}
