use std::{collections::BTreeSet, rc::Rc};

use desktop_runtime::{
    ApplicationPhase, DesktopAction, DesktopSession, PointerButton, PointerPosition,
    PointerTarget, ReducerError, RuntimeEnv, TimerKind, ToastPosition, WindowId, WindowPosition,
};
use platform_host::{
    AudioEvent, HostServices, MemoryAudioService, MemoryDocumentService,
    MemoryElementRectProvider, ScreenRect, SoundRequest, ViewportSize,
};
use pretty_assertions::assert_eq;

struct Harness {
    session: DesktopSession,
    audio: Rc<MemoryAudioService>,
    document: Rc<MemoryDocumentService>,
    layout: Rc<MemoryElementRectProvider>,
}

fn harness() -> Harness {
    let audio = Rc::new(MemoryAudioService::default());
    let document = Rc::new(MemoryDocumentService::default());
    let layout = Rc::new(MemoryElementRectProvider::default());
    let services = HostServices::headless()
        .with_audio(audio.clone())
        .with_document(document.clone())
        .with_layout(layout.clone());
    let env = RuntimeEnv::embedded().expect("embedded env");
    Harness {
        session: DesktopSession::new(env, services),
        audio,
        document,
        layout,
    }
}

/// Boot, log in, and settle on the desktop; returns the virtual time of desktop entry.
fn reach_desktop(h: &mut Harness) -> u64 {
    h.session.advance_by(5_500).expect("boot dwell");
    h.session.login().expect("login");
    h.session.advance_by(2_850).expect("welcome");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Desktop);
    h.session.now_ms()
}

fn id(raw: &str) -> WindowId {
    WindowId::from(raw)
}

#[test]
fn boot_dwell_hands_over_to_login_after_5500ms() {
    let mut h = harness();
    h.session.advance_by(5_499).expect("advance");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Boot);

    h.session.advance_by(1).expect("advance");
    assert!(h.session.state().phase.is_settled_in(ApplicationPhase::Login));
}

#[test]
fn login_reaches_desktop_after_fades_and_welcome_dwell() {
    let mut h = harness();
    h.session.advance_by(5_500).expect("boot");
    h.session.login().expect("login");

    h.session.advance_by(350).expect("fade out");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Welcome);
    h.session.advance_by(2_149).expect("fade in + welcome dwell");
    assert!(h.session.state().phase.is_settled_in(ApplicationPhase::Welcome));
    h.session.advance_by(1).expect("welcome dwell elapses");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Welcome);
    assert_eq!(h.session.state().phase.fade_opacity(), 1.0);

    h.session.advance_by(349).expect("fade out");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Welcome);
    h.session.advance_by(1).expect("fade out into desktop");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Desktop);
    h.session.advance_by(350).expect("fade in");
    assert!(h.session.state().phase.is_settled_in(ApplicationPhase::Desktop));

    assert_eq!(
        h.document.history(),
        vec![
            "PortfolioOS v1.5 - BOOT".to_string(),
            "PortfolioOS v1.5 - LOGIN".to_string(),
            "PortfolioOS v1.5 - WELCOME".to_string(),
            "PortfolioOS v1.5".to_string(),
        ]
    );
}

#[test]
fn toast_appears_3000ms_after_desktop_entry_and_hides_5000ms_later() {
    let mut h = harness();
    let entered = reach_desktop(&mut h);
    assert_eq!(h.session.deadline_of(TimerKind::ToastShow), Some(entered + 3_000));

    h.session.advance_by(2_999).expect("advance");
    assert!(!h.session.state().toast.visible);
    h.session.advance_by(1).expect("advance");
    assert!(h.session.state().toast.visible);
    assert_eq!(
        h.audio.events(),
        vec![
            AudioEvent::Unlocked("/sound/pop.mp3".to_string()),
            AudioEvent::Played(SoundRequest::new("/sound/pop.mp3", 0.45)),
        ]
    );

    h.session.advance_by(4_999).expect("advance");
    assert!(h.session.state().toast.visible);
    h.session.advance_by(1).expect("advance");
    assert!(!h.session.state().toast.visible);
}

#[test]
fn dismissing_toast_prevents_auto_hide() {
    let mut h = harness();
    reach_desktop(&mut h);
    h.session.advance_until(TimerKind::ToastShow).expect("show");
    assert!(h.session.state().toast.visible);

    h.session.dispatch(DesktopAction::DismissToast).expect("dismiss");
    assert!(!h.session.state().toast.visible);
    assert_eq!(h.session.deadline_of(TimerKind::ToastAutoHide), None);
    h.session.advance_by(10_000).expect("no stale timers");
}

#[test]
fn tray_show_uses_anchor_and_shorter_lifetime() {
    let mut h = harness();
    h.layout.set_rect("tray-info-button", ScreenRect::new(980, 740, 20, 20));
    h.session.sync_layout().expect("layout");
    let entered = reach_desktop(&mut h);
    h.session.advance_by(1_000).expect("advance");

    h.session.dispatch(DesktopAction::ShowToast).expect("show");
    let toast = &h.session.state().toast;
    assert!(toast.visible);
    assert_eq!(
        toast.position,
        ToastPosition {
            left: 694,
            top: 630,
            tail_x: 296,
        }
    );
    assert_eq!(h.session.deadline_of(TimerKind::ToastShow), None);
    assert_eq!(
        h.session.deadline_of(TimerKind::ToastAutoHide),
        Some(entered + 1_000 + 4_500)
    );
}

#[test]
fn tray_show_outside_desktop_is_rejected() {
    let mut h = harness();
    let err = h
        .session
        .dispatch(DesktopAction::ShowToast)
        .expect_err("boot phase");
    assert_eq!(
        err,
        ReducerError::PhaseMismatch {
            action: "show-toast",
            phase: ApplicationPhase::Boot,
        }
    );
}

#[test]
fn focus_then_close_leaves_first_window_active() {
    let mut h = harness();
    reach_desktop(&mut h);
    h.session.open("about").expect("open about");
    h.session.open("projects").expect("open projects");
    h.session.focus("about").expect("focus about");
    h.session.close("projects").expect("close projects");

    let state = h.session.state();
    let ids: Vec<_> = state.windows.iter().map(|w| w.id.clone()).collect();
    assert_eq!(ids, vec![id("about")]);
    assert_eq!(state.active_window, Some(id("about")));
    assert!(state.taskbar_entries()[0].active);
}

#[test]
fn double_click_opens_once_and_selects_icon() {
    let mut h = harness();
    reach_desktop(&mut h);
    h.session.double_click_icon("experience").expect("open");
    h.session.double_click_icon("experience").expect("focus");

    let state = h.session.state();
    assert_eq!(state.windows.len(), 1);
    assert_eq!(
        state.windows[0].initial_position,
        WindowPosition { x: 200, y: 20 }
    );
    assert_eq!(state.selection.selected, BTreeSet::from([id("experience")]));
}

#[test]
fn lasso_selects_intersecting_icons_through_layout() {
    let mut h = harness();
    h.layout.set_rect("desktop-surface", ScreenRect::new(0, 0, 1024, 730));
    h.layout.set_rect("desktop-icon-about", ScreenRect::new(0, 0, 50, 50));
    h.layout.set_rect("desktop-icon-experience", ScreenRect::new(100, 100, 50, 50));
    reach_desktop(&mut h);

    h.session
        .desktop_pointer_down(
            PointerPosition::new(0, 0),
            PointerButton::Primary,
            PointerTarget::DesktopSurface,
        )
        .expect("down");
    h.session
        .pointer_move(PointerPosition::new(50, 50))
        .expect("move");
    assert_eq!(h.session.state().selection.selected, BTreeSet::from([id("about")]));

    h.session
        .pointer_move(PointerPosition::new(100, 100))
        .expect("move");
    assert_eq!(
        h.session.state().selection.selected,
        BTreeSet::from([id("about"), id("experience")])
    );

    h.session.pointer_up().expect("up");
    assert!(!h.session.state().selection.is_lasso_active());
    assert_eq!(h.session.state().selection.selected.len(), 2);
}

#[test]
fn plain_click_on_desktop_clears_selection() {
    let mut h = harness();
    h.layout.set_rect("desktop-icon-about", ScreenRect::new(0, 0, 50, 50));
    reach_desktop(&mut h);
    h.session.click_icon("about").expect("click icon");
    assert_eq!(h.session.state().selection.selected, BTreeSet::from([id("about")]));

    h.session
        .desktop_pointer_down(
            PointerPosition::new(400, 400),
            PointerButton::Primary,
            PointerTarget::DesktopSurface,
        )
        .expect("down");
    h.session
        .pointer_move(PointerPosition::new(402, 401))
        .expect("move");
    h.session.pointer_up().expect("up");
    assert!(h.session.state().selection.selected.is_empty());
}

#[test]
fn lasso_is_ignored_before_desktop_phase() {
    let mut h = harness();
    h.session
        .desktop_pointer_down(
            PointerPosition::new(10, 10),
            PointerButton::Primary,
            PointerTarget::DesktopSurface,
        )
        .expect("down");
    assert!(!h.session.state().selection.is_lasso_active());
}

#[test]
fn title_bar_drag_moves_window_with_pointer() {
    let mut h = harness();
    reach_desktop(&mut h);
    h.session.open("about").expect("open");
    h.session.open("contact").expect("open");

    h.session
        .title_bar_pointer_down("about", PointerPosition::new(110, 15))
        .expect("down");
    assert_eq!(h.session.state().active_window, Some(id("about")));
    h.session
        .pointer_move(PointerPosition::new(210, 115))
        .expect("move");
    h.session.pointer_up().expect("up");
    h.session
        .pointer_move(PointerPosition::new(900, 900))
        .expect("move after release");

    let about = h.session.state().window(&id("about")).expect("about");
    assert_eq!(about.position, WindowPosition { x: 200, y: 105 });
    assert_eq!(about.initial_position, WindowPosition { x: 100, y: 5 });
    assert!(h.session.interaction().dragging.is_none());
}

#[test]
fn restart_during_boot_never_fires_first_boot_timer() {
    let mut h = harness();
    h.session.advance_by(1_000).expect("advance");
    h.session.restart().expect("restart");

    h.session.advance_by(4_600).expect("past original boot deadline");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Boot);

    h.session.advance_by(1_250).expect("new boot dwell");
    assert!(h.session.state().phase.is_settled_in(ApplicationPhase::Login));
}

#[test]
fn log_off_clears_desktop_and_returns_to_login() {
    let mut h = harness();
    reach_desktop(&mut h);
    h.session.open("about").expect("open");
    h.session.advance_until(TimerKind::ToastShow).expect("toast");

    h.session.log_off().expect("log off");
    let state = h.session.state();
    assert!(state.windows.is_empty());
    assert!(!state.toast.visible);
    assert!(state.selection.selected.is_empty());
    assert_eq!(h.session.deadline_of(TimerKind::ToastAutoHide), None);

    h.session.advance_by(700).expect("fades");
    assert!(h.session.state().phase.is_settled_in(ApplicationPhase::Login));
    h.session.advance_by(20_000).expect("idle at login");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Login);
}

#[test]
fn second_login_request_during_fade_is_rejected() {
    let mut h = harness();
    h.session.advance_by(5_500).expect("boot");
    h.session.login().expect("login");
    let err = h.session.login().expect_err("in-flight transition");
    assert_eq!(
        err,
        ReducerError::PhaseMismatch {
            action: "login",
            phase: ApplicationPhase::Login,
        }
    );
}

#[test]
fn windows_cannot_be_opened_from_the_login_screen() {
    let mut h = harness();
    h.session.advance_by(5_500).expect("boot");
    let err = h.session.open("about").expect_err("login screen");
    assert_eq!(
        err,
        ReducerError::PhaseMismatch {
            action: "open-window",
            phase: ApplicationPhase::Login,
        }
    );

    h.session.login().expect("login");
    h.session.advance_by(2_850).expect("welcome");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Desktop);
    assert!(h.session.state().windows.is_empty());
}

#[test]
fn login_click_during_login_fade_in_is_accepted() {
    let mut h = harness();
    reach_desktop(&mut h);
    h.session.advance_by(1_000).expect("settle");
    h.session.log_off().expect("log off");
    h.session.advance_by(360).expect("fade out");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Login);
    assert!(!h.session.state().phase.is_settled());

    h.session.login().expect("login while fading in");
    assert_eq!(h.session.deadline_of(TimerKind::FadeIn), None);
    h.session.advance_by(350).expect("fade out");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Welcome);
}

#[test]
fn log_off_during_welcome_fade_in_never_fires_welcome_dwell() {
    let mut h = harness();
    h.session.advance_by(5_500).expect("boot");
    h.session.login().expect("login");
    h.session.advance_by(450).expect("into welcome");
    assert_eq!(h.session.state().phase.current, ApplicationPhase::Welcome);

    h.session.log_off().expect("log off");
    assert_eq!(h.session.deadline_of(TimerKind::FadeIn), None);
    h.session.advance_by(10_000).expect("idle");

    assert!(h.session.state().phase.is_settled_in(ApplicationPhase::Login));
    assert_eq!(h.session.deadline_of(TimerKind::WelcomeDwell), None);
    assert_eq!(
        h.document.history(),
        vec![
            "PortfolioOS v1.5 - BOOT".to_string(),
            "PortfolioOS v1.5 - LOGIN".to_string(),
            "PortfolioOS v1.5 - WELCOME".to_string(),
            "PortfolioOS v1.5 - LOGIN".to_string(),
        ]
    );
}

#[test]
fn tray_show_while_visible_restarts_shorter_auto_close() {
    let mut h = harness();
    let entered = reach_desktop(&mut h);
    h.session.advance_by(3_000).expect("toast show");
    assert!(h.session.state().toast.visible);
    assert_eq!(
        h.session.deadline_of(TimerKind::ToastAutoHide),
        Some(entered + 8_000)
    );

    h.session.advance_by(1_000).expect("advance");
    h.session.dispatch(DesktopAction::ShowToast).expect("show again");
    assert_eq!(h.session.state().toast.lifetime_ms, Some(4_500));
    assert_eq!(
        h.session.deadline_of(TimerKind::ToastAutoHide),
        Some(entered + 8_500)
    );
    assert_eq!(h.audio.played().len(), 2);

    h.session.advance_by(4_000).expect("past first deadline");
    assert!(h.session.state().toast.visible);
    h.session.advance_by(500).expect("restarted deadline");
    assert!(!h.session.state().toast.visible);
}

#[test]
fn viewport_resize_repositions_visible_toast() {
    let mut h = harness();
    h.layout.set_rect("tray-info-button", ScreenRect::new(980, 740, 20, 20));
    h.session.sync_layout().expect("layout");
    reach_desktop(&mut h);
    h.session.advance_by(3_000).expect("toast show");
    assert_eq!(h.session.state().toast.position.left, 694);

    h.layout.set_viewport(ViewportSize {
        width: 800,
        height: 600,
    });
    h.session.sync_layout().expect("resize");
    assert_eq!(
        h.session.state().toast.position,
        ToastPosition {
            left: 470,
            top: 462,
            tail_x: 298,
        }
    );
}
