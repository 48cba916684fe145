use sky_shooter::input::FrameInput;
use sky_shooter::render::Sprite;
use sky_shooter::session::{Phase, FADE_STEP};
use sky_shooter::{Session, SessionError};

use rand::rngs::mock::StepRng;

fn ready_session() -> Session {
    let mut s = Session::new();
    for sprite in Sprite::ALL {
        s.asset_loaded(sprite).unwrap();
    }
    s
}

fn playing_session() -> Session {
    let mut s = ready_session();
    s.intro_finished(0.0).unwrap();
    s
}

#[test]
fn starts_loading() {
    let s = Session::new();
    assert!(matches!(s.phase(), Phase::Loading { .. }));
    assert!(!s.is_ready());
    assert!(s.game().is_none());
    assert_eq!(s.fade(), 1.0);
}

#[test]
fn ready_only_after_every_asset() {
    let mut s = Session::new();
    for sprite in &Sprite::ALL[..Sprite::ALL.len() - 1] {
        s.asset_loaded(*sprite).unwrap();
        assert!(!s.is_ready());
    }
    s.asset_loaded(Sprite::MissileItem).unwrap();
    assert!(s.is_ready());
}

#[test]
fn duplicate_asset_rejected() {
    let mut s = Session::new();
    s.asset_loaded(Sprite::Player).unwrap();
    assert_eq!(
        s.asset_loaded(Sprite::Player),
        Err(SessionError::AssetAlreadyLoaded(Sprite::Player))
    );
}

#[test]
fn intro_cannot_finish_before_assets() {
    let mut s = Session::new();
    s.asset_loaded(Sprite::Background).unwrap();
    assert_eq!(
        s.intro_finished(0.0),
        Err(SessionError::NotReady {
            loaded: 1,
            total: Sprite::ALL.len()
        })
    );
}

#[test]
fn intro_finish_starts_a_game() {
    let mut s = ready_session();
    s.intro_finished(500.0).unwrap();
    let game = s.game().unwrap();
    assert_eq!(game.start_ms, 500.0);
    assert!(!game.is_over());
    assert_eq!(s.fade(), 1.0);
    assert_eq!(s.intro_finished(600.0), Err(SessionError::AlreadyPlaying));
}

#[test]
fn frame_requires_playing() {
    let mut s = ready_session();
    let err = s
        .frame(&FrameInput::default(), 0.0, &mut StepRng::new(u64::MAX, 0))
        .unwrap_err();
    assert_eq!(err, SessionError::NotPlaying);
}

#[test]
fn fade_drops_each_frame_and_stops_at_zero() {
    let mut s = playing_session();
    let mut rng = StepRng::new(u64::MAX, 0);
    s.frame(&FrameInput::default(), 16.0, &mut rng).unwrap();
    assert!((s.fade() - (1.0 - FADE_STEP)).abs() < 1e-6);
    for i in 0..100 {
        s.frame(&FrameInput::default(), 32.0 + i as f64, &mut rng).unwrap();
    }
    assert_eq!(s.fade(), 0.0);
}

#[test]
fn restart_only_after_game_over() {
    let mut s = playing_session();
    assert_eq!(s.restart(10.0), Err(SessionError::GameStillRunning));

    // An enemy every frame wears the player down quickly
    let mut rng = StepRng::new(0, 0);
    let mut frame = 1;
    while !s.game().unwrap().is_over() {
        let draw = s
            .frame(&FrameInput::default(), frame as f64 * 16.0, &mut rng)
            .unwrap();
        frame += 1;
        assert!(frame < 5_000, "game never ended");
        if s.game().unwrap().is_over() {
            assert!(draw.game_over().is_some());
        }
    }

    // Once over, frames draw nothing
    let draw = s.frame(&FrameInput::default(), 1e6, &mut rng).unwrap();
    assert!(draw.is_empty());

    s.restart(2e6).unwrap();
    let game = s.game().unwrap();
    assert!(!game.is_over());
    assert_eq!(game.start_ms, 2e6);
    assert_eq!(game.score, 0);
    assert_eq!(s.fade(), 0.0);
}

#[test]
fn restart_before_playing_rejected() {
    let mut s = Session::new();
    assert_eq!(s.restart(0.0), Err(SessionError::NotPlaying));
}
