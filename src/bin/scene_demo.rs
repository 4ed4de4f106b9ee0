//! Builds (or reloads) the sample scene and steps it for a few frames,
//! printing scene statistics. Pass a path to an app config JSON to override
//! the defaults, e.g. to flip `load_existing`.

use haar::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    let mut app = App::with_config(config);
    app.push_layer(DefaultSceneLayer::default());
    app.run_load()?;

    // Step a couple of seconds of simulation at 60 Hz
    let dt = 1.0 / 60.0;
    for _ in 0..120 {
        app.update(dt);
    }

    if let Some(scene) = app.scene() {
        let stats = scene.statistics();
        log::info!(
            "scene after 120 steps: {} objects, {} components, {} lights",
            stats.object_count,
            stats.component_count,
            stats.light_count
        );
        if let Some(camera) = scene.main_camera {
            log::info!("main camera at {:?}", scene.world_position(camera));
        }
    }

    Ok(())
}
