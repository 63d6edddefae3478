//! WGSL source generation
//!
//! The accumulate shader is assembled from snippets: the circle SDF, the
//! operator chosen by the primitive's blend mode, coverage and blend. One
//! program is built per [`BlendMode`], the operator is inlined at the call
//! site.

// String writing is infallible, so .unwrap() is safe here
#![allow(clippy::unwrap_used)]

use std::fmt::Write;

use splat_core::ops::BlendMode;

const SPLAT_UNIFORMS: &str = r#"
struct SplatUniforms {
    center: vec2<f32>,
    radius: f32,
    smoothing: f32,
    color: vec3<f32>,
    edge_thickness: f32,
    falloff: f32,
    alpha_mode: u32,
    viewport: vec2<f32>,
}

@group(0) @binding(0) var<uniform> u: SplatUniforms;
@group(0) @binding(1) var prev_distance: texture_2d<f32>;
@group(0) @binding(2) var prev_color: texture_2d<f32>;
"#;

const PRESENT_UNIFORMS: &str = r#"
struct PresentUniforms {
    fill: vec4<f32>,
    border: vec4<f32>,
    background: vec4<f32>,
    border_width: f32,
    gamma: f32,
    fill_mode: u32,
    _padding: u32,
}

@group(0) @binding(0) var<uniform> u: PresentUniforms;
@group(0) @binding(1) var acc_distance: texture_2d<f32>;
@group(0) @binding(2) var acc_color: texture_2d<f32>;
"#;

/// Full-screen triangle
const FULLSCREEN_VERTEX: &str = r#"
@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> @builtin(position) vec4<f32> {
    let x = f32(i32(index & 1u) * 4 - 1);
    let y = f32(i32(index >> 1u) * 4 - 1);
    return vec4<f32>(x, y, 0.0, 1.0);
}
"#;

/// Circle SDF snippet
pub const SD_CIRCLE: &str = r#"
fn sd_circle(p: vec2<f32>, r: f32) -> f32 {
    return length(p) - r;
}
"#;

/// Rounded union snippet
pub const OP_UNION_ROUND: &str = r#"
fn op_union_round(a: f32, b: f32, r: f32) -> f32 {
    if (r == 0.0) {
        return min(a, b);
    }
    let u = max(vec2<f32>(r - a, r - b), vec2<f32>(0.0));
    return max(r, min(a, b)) - length(u);
}
"#;

/// Rounded difference snippet
pub const OP_DIFFERENCE_ROUND: &str = r#"
fn op_difference_round(a: f32, b: f32, r: f32) -> f32 {
    if (r == 0.0) {
        return max(a, -b);
    }
    let u = max(vec2<f32>(r + a, r - b), vec2<f32>(0.0));
    return min(-r, max(a, -b)) + length(u);
}
"#;

/// Coverage and blend snippets
pub const COMPOSITE: &str = r#"
fn coverage(d: f32, t: f32, f: f32) -> f32 {
    if (d < t) {
        return 1.0;
    }
    return abs(t / pow(d, f));
}

fn blend(back: vec4<f32>, front: vec4<f32>, alpha_mode: u32) -> vec4<f32> {
    let rgb = front.rgb * front.a + back.rgb * (1.0 - front.a);
    var a = front.a + back.a;
    if (alpha_mode == 1u) {
        a = front.a + back.a * (1.0 - front.a);
    }
    return clamp(vec4<f32>(rgb, a), vec4<f32>(0.0), vec4<f32>(1.0));
}
"#;

/// Source of the operator function for `mode`
pub fn operator_source(mode: BlendMode) -> &'static str {
    match mode {
        BlendMode::Union => OP_UNION_ROUND,
        BlendMode::Difference => OP_DIFFERENCE_ROUND,
    }
}

/// Build the accumulate shader for primitives splatted with `mode`.
///
/// Reads the previous distance/color textures and writes the merged distance
/// to target 0 (`.x`) and the composited color to target 1.
pub fn build_splat_shader(mode: BlendMode) -> String {
    let mut code = String::new();

    writeln!(code, "// splat accumulate pass ({:?})", mode).unwrap();
    code.push_str(SPLAT_UNIFORMS);
    code.push_str(FULLSCREEN_VERTEX);
    code.push_str(SD_CIRCLE);
    code.push_str(operator_source(mode));
    code.push_str(COMPOSITE);

    writeln!(code).unwrap();
    writeln!(code, "struct SplatOutput {{").unwrap();
    writeln!(code, "    @location(0) distance: vec4<f32>,").unwrap();
    writeln!(code, "    @location(1) color: vec4<f32>,").unwrap();
    writeln!(code, "}}").unwrap();
    writeln!(code).unwrap();
    writeln!(code, "@fragment").unwrap();
    writeln!(
        code,
        "fn fs_main(@builtin(position) frag: vec4<f32>) -> SplatOutput {{"
    )
    .unwrap();
    writeln!(code, "    let texel = vec2<i32>(frag.xy);").unwrap();
    writeln!(code, "    let uv = frag.xy / u.viewport;").unwrap();
    writeln!(
        code,
        "    let p = vec2<f32>(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0);"
    )
    .unwrap();
    writeln!(
        code,
        "    let old_d = textureLoad(prev_distance, texel, 0).x;"
    )
    .unwrap();
    writeln!(
        code,
        "    let old_color = textureLoad(prev_color, texel, 0);"
    )
    .unwrap();
    writeln!(code, "    let new_d = sd_circle(p - u.center, u.radius);").unwrap();
    writeln!(
        code,
        "    let new_a = coverage(new_d, u.edge_thickness, u.falloff);"
    )
    .unwrap();
    writeln!(
        code,
        "    let d = {}(old_d, new_d, u.smoothing);",
        mode.op_name()
    )
    .unwrap();
    writeln!(
        code,
        "    let c = blend(vec4<f32>(u.color, new_a), old_color, u.alpha_mode);"
    )
    .unwrap();
    writeln!(code, "    var out: SplatOutput;").unwrap();
    writeln!(code, "    out.distance = vec4<f32>(d, 0.0, 0.0, 0.0);").unwrap();
    writeln!(code, "    out.color = c;").unwrap();
    writeln!(code, "    return out;").unwrap();
    writeln!(code, "}}").unwrap();

    code
}

/// Build the presentation shader
pub fn build_present_shader() -> String {
    let mut code = String::new();

    writeln!(code, "// splat presentation pass").unwrap();
    code.push_str(PRESENT_UNIFORMS);
    code.push_str(FULLSCREEN_VERTEX);
    code.push_str(
        r#"
@fragment
fn fs_main(@builtin(position) frag: vec4<f32>) -> @location(0) vec4<f32> {
    let texel = vec2<i32>(frag.xy);
    let d = textureLoad(acc_distance, texel, 0).x;
    let color = textureLoad(acc_color, texel, 0);

    var c = u.background;
    if (u.border_width > 0.0 && abs(d) <= u.border_width) {
        c = u.border;
    } else if (d <= 0.0) {
        c = u.fill;
        if (u.fill_mode == 1u) {
            c = vec4<f32>(color.rgb, 1.0);
        }
    }

    if (u.gamma > 0.0) {
        c = vec4<f32>(pow(c.rgb, vec3<f32>(1.0 / u.gamma)), c.a);
    }
    return clamp(c, vec4<f32>(0.0), vec4<f32>(1.0));
}
"#,
    );

    code
}
