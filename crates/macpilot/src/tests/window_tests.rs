use crate::tests::fake_engine::{automation, ok, FakeEngine};
use crate::types::WindowBounds;

#[tokio::test]
async fn window_bounds_decodes_the_tuple() {
    let engine = FakeEngine::new(vec![ok("100,200,800,600")]);
    let auto = automation(&engine);

    let bounds = auto.window_bounds("zz-app-zz", 2).await.unwrap();
    assert_eq!(
        bounds,
        WindowBounds {
            x: 100,
            y: 200,
            width: 800,
            height: 600
        }
    );
    assert!(engine.scripts()[0].contains("set w to window 2"));
}

#[tokio::test]
async fn set_window_bounds_with_nothing_to_do_runs_no_script() {
    let engine = FakeEngine::new(vec![]);
    let auto = automation(&engine);

    auto.set_window_bounds("zz-app-zz", None, None, 1).await.unwrap();
    assert!(engine.scripts().is_empty());
}

#[tokio::test]
async fn set_window_bounds_moves_without_resizing() {
    let engine = FakeEngine::new(vec![ok("")]);
    let auto = automation(&engine);

    auto.set_window_bounds("zz-app-zz", Some((10, 20)), None, 1)
        .await
        .unwrap();

    let script = &engine.scripts()[0];
    assert!(script.contains("set position of w to {10, 20}"));
    assert!(!script.contains("set size"));
}

#[tokio::test]
async fn set_window_bounds_resizes_without_moving() {
    let engine = FakeEngine::new(vec![ok("")]);
    let auto = automation(&engine);

    auto.set_window_bounds("zz-app-zz", None, Some((640, 480)), 1)
        .await
        .unwrap();

    let script = &engine.scripts()[0];
    assert!(script.contains("set size of w to {640, 480}"));
    assert!(!script.contains("set position"));
}

#[tokio::test]
async fn list_windows_fetches_count_then_each_window() {
    let engine = FakeEngine::new(vec![
        ok("2"),
        ok("Main|0,0,800,600|true"),
        ok("|5,5,400,300|false"),
    ]);
    let auto = automation(&engine);

    let windows = auto.list_windows("zz-app-zz").await.unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].name, "Main");
    assert_eq!(windows[0].index, 1);
    assert!(windows[0].visible);
    assert_eq!(windows[1].name, "Window 2");
    assert_eq!(windows[1].bounds.width, 400);
    assert!(!windows[1].visible);

    let scripts = engine.scripts();
    assert_eq!(scripts.len(), 3);
    assert!(scripts[1].contains("set w to window 1"));
    assert!(scripts[2].contains("set w to window 2"));
}

#[tokio::test]
async fn list_windows_of_a_windowless_process_is_empty() {
    let engine = FakeEngine::new(vec![ok("0")]);
    let auto = automation(&engine);

    assert!(auto.list_windows("zz-app-zz").await.unwrap().is_empty());
    assert_eq!(engine.scripts().len(), 1);
}

#[tokio::test]
async fn focus_window_raises_and_fronts() {
    let engine = FakeEngine::new(vec![ok("")]);
    let auto = automation(&engine);

    auto.focus_window("zz-app-zz", 3).await.unwrap();

    let script = &engine.scripts()[0];
    assert!(script.contains(r#"perform action "AXRaise" of window 3"#));
    assert!(script.contains("set frontmost to true"));
}
