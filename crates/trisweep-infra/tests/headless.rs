// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use approx::assert_relative_eq;
use trisweep_core::population::TRIANGLE_HALF_SIZE;
use trisweep_core::{
    DrawBackend, EffectConfiguration, LightRig, Population, RenderError, Scene, VertexLayout,
};
use trisweep_infra::HeadlessRenderer;

fn scene(count: usize) -> Scene {
    let mut population = Population::with_seed(21);
    population.resize(count);
    Scene::new(population, EffectConfiguration::BASIC, LightRig::reference())
}

#[test]
fn vertex_data_is_refetched_only_after_resize() {
    let mut scene = scene(10);
    let mut renderer = HeadlessRenderer::new(VertexLayout::Extended);

    let first = renderer.draw(&scene.frame_input()).expect("draw");
    assert!(first.vertex_data_uploaded);
    assert_eq!(first.triangles_drawn, 10);
    assert_eq!(renderer.uploaded_generation(), Some(scene.population.generation()));

    scene.population.tick(0.1);
    let second = renderer.draw(&scene.frame_input()).expect("draw");
    assert!(!second.vertex_data_uploaded);
    assert_eq!(second.frame_number, first.frame_number + 1);

    scene.population.resize(35);
    let third = renderer.draw(&scene.frame_input()).expect("draw");
    assert!(third.vertex_data_uploaded);
    assert_eq!(third.triangles_drawn, 35);
}

#[test]
fn basic_layout_rejects_effects() {
    let mut scene = scene(3);
    let mut renderer = HeadlessRenderer::new(VertexLayout::Basic);
    assert!(renderer.draw(&scene.frame_input()).is_ok());

    scene.effects = EffectConfiguration::LIGHTING;
    match renderer.draw(&scene.frame_input()) {
        Err(RenderError::UnsupportedEffects(effects)) => {
            assert_eq!(effects, EffectConfiguration::LIGHTING)
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn centroid_follows_instance_positions_at_rest() {
    let scene = scene(16);
    let mut renderer = HeadlessRenderer::new(VertexLayout::Basic);
    renderer.draw(&scene.frame_input()).expect("draw");

    let instances = scene.population.instances();
    let n = instances.len() as f32;
    let mean_x: f32 = instances.iter().map(|i| i.position.x).sum::<f32>() / n;
    let mean_y: f32 = instances.iter().map(|i| i.position.y).sum::<f32>() / n;

    let centroid = renderer.last_frame_centroid();
    assert_relative_eq!(centroid.x, mean_x, epsilon = 1e-5);
    assert_relative_eq!(centroid.y, mean_y - TRIANGLE_HALF_SIZE / 3.0, epsilon = 1e-5);
}

#[test]
fn texturing_never_brightens() {
    let mut scene = scene(64);
    let mut renderer = HeadlessRenderer::new(VertexLayout::Extended);

    renderer.draw(&scene.frame_input()).expect("draw");
    let plain = renderer.last_frame_energy();
    assert!(plain > 0.0);

    scene.effects = EffectConfiguration::TEXTURING;
    renderer.draw(&scene.frame_input()).expect("draw");
    assert!(renderer.last_frame_energy() <= plain);

    scene.effects = EffectConfiguration::COMBINED;
    renderer.draw(&scene.frame_input()).expect("draw");
    assert!(renderer.last_frame_energy().is_finite());
}

#[test]
fn empty_population_draws_nothing() {
    let scene = Scene::new(
        Population::with_seed(0),
        EffectConfiguration::COMBINED,
        LightRig::reference(),
    );
    let mut renderer = HeadlessRenderer::default();
    let stats = renderer.draw(&scene.frame_input()).expect("draw");
    assert_eq!(stats.triangles_drawn, 0);
    assert_eq!(renderer.last_frame_energy(), 0.0);
    assert_eq!(renderer.name(), "headless");
}
