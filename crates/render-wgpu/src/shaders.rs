/// WGSL shader for the water plane.
///
/// The vertex stage lifts each vertex by the wave elevation (same formula as
/// `tidewater_waves::field::elevation`); the fragment stage blends depth and
/// surface colours by the interpolated elevation.
pub const WATER_SHADER: &str = r#"
struct WaterUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    depth_color: vec4<f32>,
    surface_color: vec4<f32>,
    waves_frequency: vec2<f32>,
    time: f32,
    waves_elevation: f32,
    waves_speed: f32,
    small_waves_elevation: f32,
    small_waves_frequency: f32,
    small_waves_speed: f32,
    small_waves_iterations: u32,
    color_offset: f32,
    color_multiplier: f32,
    _pad: f32,
};

@group(0) @binding(0)
var<uniform> u: WaterUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) elevation: f32,
};

fn wave_elevation(p: vec2<f32>) -> f32 {
    let phase = u.time * u.waves_speed;
    var e = sin(p.x * u.waves_frequency.x + phase)
        * sin(p.y * u.waves_frequency.y + phase)
        * u.waves_elevation;

    let ripple_phase = u.time * u.small_waves_speed;
    for (var n: u32 = 1u; n <= u.small_waves_iterations; n = n + 1u) {
        let i = f32(n);
        let q = p * u.small_waves_frequency * i;
        let ripple = sin(q.x + ripple_phase + i) * sin(q.y - ripple_phase + 2.0 * i);
        e -= abs(ripple) * u.small_waves_elevation / i;
    }
    return e;
}

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var model_pos = u.model * vec4<f32>(vertex.position, 1.0);
    let e = wave_elevation(model_pos.xz);
    model_pos.y += e;

    var out: VertexOutput;
    out.clip_position = u.view_proj * model_pos;
    out.elevation = e;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let mix_strength = (in.elevation + u.color_offset) * u.color_multiplier;
    let color = mix(u.depth_color.rgb, u.surface_color.rgb, vec3<f32>(mix_strength));
    return vec4<f32>(color, 1.0);
}
"#;

/// Fullscreen triangle that copies the offscreen scene onto the surface,
/// stretching it when the scene was drawn below the surface resolution.
pub const BLIT_SHADER: &str = r#"
@group(0) @binding(0)
var scene_texture: texture_2d<f32>;
@group(0) @binding(1)
var scene_sampler: sampler;

struct BlitOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_blit(@builtin(vertex_index) index: u32) -> BlitOutput {
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    var out: BlitOutput;
    out.clip_position = vec4<f32>(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0, 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_blit(in: BlitOutput) -> @location(0) vec4<f32> {
    return textureSample(scene_texture, scene_sampler, in.uv);
}
"#;
