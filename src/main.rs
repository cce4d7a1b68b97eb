use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::env;
use std::time::Duration;

use volley::config::{self, WeaponConfig};
use volley::pickups::PickupPlugin;
use volley::testing;
use volley::weapon::WeaponPlugin;

fn main() {
    // Scenario selection mirrors the tuning workflow: every run is headless
    // and scripted, there is no interactive window in this crate.
    let scenario = env::var("VOLLEY_SCENARIO").unwrap_or_else(|_| "sustained_overheat".into());

    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
    )
    .add_plugins((WeaponPlugin, PickupPlugin))
    // WeaponPlugin inserts compiled defaults; the loader overlays
    // assets/weapon.toml (if present and valid) before the first tick.
    .add_systems(Startup, (config::load_weapon_config, report_active_config).chain());

    testing::configure_scenario(&mut app, &scenario);

    app.run();
}

/// Print the handful of tunables that shape a scenario run.
fn report_active_config(config: Res<WeaponConfig>) {
    println!(
        "✓ Weapon config: heat {}/{} per shot/cap | cooldown {}/s | overheat {} s | max level {}",
        config.heat_per_shot,
        config.max_heat,
        config.cooldown_rate,
        config.overheat_duration,
        config.max_level
    );
}
