use wire_cube::{
    CubeConfig, Context, data_structures::camera::PerspectiveCamera, render::Renderer,
    schedule::ManualScheduler,
};

use crate::common::test_utils::{FakeHost, RecordingRenderer, approx_eq};

mod common;

#[test]
fn should_follow_container_to_900() {
    let host = FakeHost::new(600);
    let mut ctx = Context::new(CubeConfig::default(), &host, RecordingRenderer::new());

    host.set_width(900);
    ctx.resize(&host);

    assert_eq!(ctx.camera.aspect, 3.0);
    assert_eq!(ctx.sizes.width, 900);
    assert_eq!(ctx.sizes.height, 300);
    assert_eq!(ctx.renderer.size().width, 900);
    assert_eq!(ctx.renderer.size().height, 300);
    assert_eq!(ctx.renderer.set_size_calls.last(), Some(&(900, 300)));
}

#[test]
fn should_recompute_projection_after_aspect_change() {
    let host = FakeHost::new(600);
    let mut ctx = Context::new(CubeConfig::default(), &host, RecordingRenderer::new());

    host.set_width(900);
    ctx.resize(&host);

    let fresh = PerspectiveCamera::new(75.0, 3.0, 0.1, 2000.0);
    assert_eq!(ctx.camera.projection_matrix(), fresh.projection_matrix());
}

#[test]
fn should_keep_aspect_in_sync_for_any_width() {
    let host = FakeHost::new(600);
    let mut ctx = Context::new(CubeConfig::default(), &host, RecordingRenderer::new());

    for width in [1, 299, 300, 301, 777, 1024, 1920, 3840, 450] {
        host.set_width(width);
        ctx.resize(&host);
        assert_eq!(
            ctx.camera.aspect,
            ctx.sizes.width as f32 / ctx.sizes.height as f32,
            "width {}",
            width
        );
        assert_eq!(ctx.sizes.width, width);
    }
}

#[test]
fn should_cap_pixel_ratio_at_two() {
    let host = FakeHost::new(600).with_pixel_ratio(3.0);
    let mut ctx = Context::new(CubeConfig::default(), &host, RecordingRenderer::new());

    ctx.resize(&host);
    assert_eq!(ctx.renderer.pixel_ratio(), 2.0);

    host.set_pixel_ratio(1.5);
    ctx.resize(&host);
    assert_eq!(ctx.renderer.pixel_ratio(), 1.5);

    host.set_pixel_ratio(2.0);
    ctx.resize(&host);
    assert_eq!(ctx.renderer.pixel_ratio(), 2.0);

    assert!(ctx.renderer.pixel_ratio_calls.iter().all(|&ratio| ratio <= 2.0));
}

#[test]
fn should_respect_configured_pixel_ratio_cap() {
    let config = CubeConfig {
        max_pixel_ratio: 1.0,
        ..Default::default()
    };
    let host = FakeHost::new(600).with_pixel_ratio(2.0);
    let mut ctx = Context::new(config, &host, RecordingRenderer::new());

    ctx.resize(&host);

    assert_eq!(ctx.renderer.pixel_ratio(), 1.0);
}

#[test]
fn should_be_idempotent_for_unchanged_width() {
    let host = FakeHost::new(800).with_pixel_ratio(1.25);
    let mut ctx = Context::new(CubeConfig::default(), &host, RecordingRenderer::new());

    ctx.resize(&host);
    let aspect = ctx.camera.aspect;
    let projection = ctx.camera.projection_matrix();
    let sizes = ctx.sizes;
    let renderer_size = ctx.renderer.size();
    let ratio = ctx.renderer.pixel_ratio();

    ctx.resize(&host);

    assert_eq!(ctx.camera.aspect, aspect);
    assert_eq!(ctx.camera.projection_matrix(), projection);
    assert_eq!(ctx.sizes, sizes);
    assert_eq!(ctx.renderer.size(), renderer_size);
    assert_eq!(ctx.renderer.pixel_ratio(), ratio);
}

#[test]
fn should_survive_zero_width_container() {
    let host = FakeHost::new(600);
    let mut ctx = Context::new(CubeConfig::default(), &host, RecordingRenderer::new());
    let projection = ctx.camera.projection_matrix();

    host.set_width(0);
    ctx.resize(&host);

    assert_eq!(ctx.camera.aspect, 0.0);
    assert_eq!(ctx.renderer.size().width, 0);
    // No usable projection for a zero-wide view; the last good one stays.
    assert_eq!(ctx.camera.projection_matrix(), projection);

    host.set_width(600);
    ctx.resize(&host);
    assert_eq!(ctx.camera.aspect, 2.0);
}

#[test]
fn should_not_disturb_rotation_between_frames() {
    let host = FakeHost::new(600);
    let mut ctx = Context::new(CubeConfig::default(), &host, RecordingRenderer::new());
    let scheduler = ManualScheduler::new();

    for frame in 0..10 {
        ctx.animate(&scheduler);
        if frame % 3 == 0 {
            host.set_width(600 + frame * 10);
            ctx.resize(&host);
        }
    }

    assert!(approx_eq(ctx.cube().rotation.x, 0.1));
    assert_eq!(scheduler.requested(), 10);
    // The resize after the final frame only shows up on the next one.
    let last = ctx.renderer.frames.last().map(|frame| frame.aspect);
    assert_eq!(last, Some(660.0 / 300.0));
    assert_eq!(ctx.camera.aspect, 690.0 / 300.0);
}
