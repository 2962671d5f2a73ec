//! Embedded catalog data for the Godot shading language: data types,
//! keywords, uniform hints, shader types, and the spatial shader's render
//! modes and built-in variables, as documented in the Godot shading
//! language reference.

use lsp_types::{CompletionItem, CompletionItemKind, Documentation, MarkupContent, MarkupKind};

use super::{
    always_true, and, first_token_one_of, in_function, is_first, last_token_is_data_type,
    last_token_is_punctuation, last_token_one_of, not, or, sequence, shader_type_is,
    tokens_contain, CatalogEntry, Predicate,
};

pub(super) fn is_data_type(name: &str) -> bool {
    DATA_TYPES.iter().any(|&(label, _)| label == name)
}

/// Qualifiers a type name may directly follow in a declaration.
const TYPE_QUALIFIERS: &[&str] = &[
    "uniform", "varying", "in", "out", "inout", "flat", "smooth", "lowp", "mediump", "highp",
];

const SIMPLE_KEYWORDS: &[&str] = &[
    "break", "case", "continue", "default", "do", "else", "for", "if", "return", "switch",
    "while", "const", "struct",
];

const DESCRIBED_KEYWORD_LABELS: &[&str] = &[
    "lowp", "mediump", "highp", "discard", "in", "out", "inout", "shader_type", "render_mode",
    "uniform", "varying", "flat", "smooth", "group_uniforms",
];

const FIRST_IN_ARGUMENT: &[&str] = &["(", ","];

pub(super) fn build() -> Vec<CatalogEntry> {
    let mut entries = Vec::new();

    for &(label, doc) in DATA_TYPES {
        entries.push(CatalogEntry::new(
            or(vec![
                last_token_is_punctuation(),
                last_token_one_of(TYPE_QUALIFIERS),
            ]),
            documented(label, CompletionItemKind::CLASS, doc),
        ));
    }

    for &keyword in SIMPLE_KEYWORDS {
        entries.push(CatalogEntry::new(
            or(vec![
                not(or(vec![
                    last_token_is_data_type(),
                    last_token_one_of(SIMPLE_KEYWORDS),
                ])),
                sequence(keyword, &["else"]),
            ]),
            keyword_item(keyword, None),
        ));
    }

    for (label, predicate, doc) in described_keywords() {
        entries.push(CatalogEntry::new(
            and(vec![predicate, not(last_token_one_of(DESCRIBED_KEYWORD_LABELS))]),
            keyword_item(label, Some(doc)),
        ));
    }

    let in_uniform_hint_position =
        || and(vec![first_token_one_of(&["uniform"]), tokens_contain(":")]);

    for &(label, doc) in UNIFORM_HINTS {
        entries.push(CatalogEntry::new(
            in_uniform_hint_position(),
            keyword_item(label, Some(doc)),
        ));
    }

    for &(label, doc) in FUNCTION_UNIFORM_HINTS {
        entries.push(CatalogEntry::new(
            in_uniform_hint_position(),
            documented(label, CompletionItemKind::FUNCTION, doc),
        ));
    }

    for &(label, doc) in SHADER_TYPES {
        entries.push(CatalogEntry::new(
            last_token_one_of(&["shader_type"]),
            keyword_item(label, Some(doc)),
        ));
    }

    for &(label, doc) in SPATIAL_RENDER_MODES {
        entries.push(CatalogEntry::new(
            and(vec![
                shader_type_is("spatial"),
                first_token_one_of(&["render_mode"]),
            ]),
            keyword_item(label, Some(doc)),
        ));
    }

    for &(name, detail, doc) in SPATIAL_GLOBAL_BUILTINS {
        entries.push(CatalogEntry::new(
            and(vec![shader_type_is("spatial"), always_true()]),
            constant_item(name, detail, doc),
        ));
    }

    for (function, table) in [
        ("vertex", SPATIAL_VERTEX_BUILTINS),
        ("fragment", SPATIAL_FRAGMENT_BUILTINS),
        ("light", SPATIAL_LIGHT_BUILTINS),
    ] {
        for &(name, detail, doc) in table {
            entries.push(CatalogEntry::new(
                and(vec![shader_type_is("spatial"), in_function(function)]),
                constant_item(name, detail, doc),
            ));
        }
    }

    entries
}

fn described_keywords() -> Vec<(&'static str, Predicate, &'static str)> {
    vec![
        ("lowp", always_true(), "low precision, usually 8 bits per component mapped to 0-1"),
        ("mediump", always_true(), "medium precision, usually 16 bits or half float"),
        ("highp", always_true(), "high precision, uses full float or integer range (32 bit default)"),
        (
            "discard",
            is_first(),
            "Discards the current fragment, preventing it from being drawn. Used in fragment shaders to skip rendering under certain conditions.",
        ),
        ("in", last_token_one_of(FIRST_IN_ARGUMENT), "An argument only for reading"),
        ("out", last_token_one_of(FIRST_IN_ARGUMENT), "An argument only for writing"),
        (
            "inout",
            last_token_one_of(FIRST_IN_ARGUMENT),
            "An argument that is fully passed via reference",
        ),
        (
            "shader_type",
            is_first(),
            "Declares the type of shader being written, such as `canvas_item`, `spatial`, or `particle`.",
        ),
        ("render_mode", is_first(), "Declares one or more render modes of the shader"),
        ("uniform", is_first(), "Declares a variable that can be set from outside the shader"),
        (
            "varying",
            is_first(),
            "Declares a variable that is passed between vertex and fragment shaders",
        ),
        ("flat", last_token_one_of(&["varying"]), "The value is not interpolated"),
        (
            "smooth",
            last_token_one_of(&["varying"]),
            "The value is interpolated in a perspective-correct fashion. This is the default.",
        ),
        ("group_uniforms", is_first(), "Group multiple uniforms together in the inspector"),
    ]
}

fn markdown(value: &str) -> Documentation {
    Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value: value.to_string(),
    })
}

fn keyword_item(label: &str, doc: Option<&str>) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        kind: Some(CompletionItemKind::KEYWORD),
        documentation: doc.map(markdown),
        ..Default::default()
    }
}

fn documented(label: &str, kind: CompletionItemKind, doc: &str) -> CompletionItem {
    CompletionItem {
        label: label.to_string(),
        kind: Some(kind),
        documentation: Some(markdown(doc)),
        ..Default::default()
    }
}

fn constant_item(name: &str, detail: &str, doc: &str) -> CompletionItem {
    CompletionItem {
        label: name.to_string(),
        kind: Some(CompletionItemKind::CONSTANT),
        detail: Some(detail.to_string()),
        documentation: if doc.is_empty() { None } else { Some(markdown(doc)) },
        ..Default::default()
    }
}

const DATA_TYPES: &[(&str, &str)] = &[
    ("void", "Void datatype, useful only for functions that return nothing."),
    ("bool", "Boolean datatype, can only contain `true` or `false`."),
    ("bvec2", "Two-component vector of booleans."),
    ("bvec3", "Three-component vector of booleans."),
    ("bvec4", "Four-component vector of booleans."),
    ("int", "32 bit signed scalar integer."),
    ("ivec2", "Two-component vector of signed integers."),
    ("ivec3", "Three-component vector of signed integers."),
    ("ivec4", "Four-component vector of signed integers."),
    ("uint", "Unsigned scalar integer; can't contain negative numbers."),
    ("uvec2", "Two-component vector of unsigned integers."),
    ("uvec3", "Three-component vector of unsigned integers."),
    ("uvec4", "Four-component vector of unsigned integers."),
    ("float", "32 bit floating-point scalar."),
    ("vec2", "Two-component vector of floating-point values."),
    ("vec3", "Three-component vector of floating-point values."),
    ("vec4", "Four-component vector of floating-point values."),
    ("mat2", "2x2 matrix, in column major order."),
    ("mat3", "3x3 matrix, in column major order."),
    ("mat4", "4x4 matrix, in column major order."),
    ("sampler2D", "Sampler type for binding 2D textures, which are read as float."),
    ("isampler2D", "Sampler type for binding 2D textures, which are read as signed integer."),
    ("usampler2D", "Sampler type for binding 2D textures, which are read as unsigned integer."),
    ("sampler2DArray", "Sampler type for binding 2D texture arrays, which are read as float."),
    (
        "isampler2DArray",
        "Sampler type for binding 2D texture arrays, which are read as signed integer.",
    ),
    (
        "usampler2DArray",
        "Sampler type for binding 2D texture arrays, which are read as unsigned integer.",
    ),
    ("sampler3D", "Sampler type for binding 3D textures, which are read as float."),
    ("isampler3D", "Sampler type for binding 3D textures, which are read as signed integer."),
    ("usampler3D", "Sampler type for binding 3D textures, which are read as unsigned integer."),
    ("samplerCube", "Sampler type for binding Cubemaps, which are read as float."),
    (
        "samplerCubeArray",
        "Sampler type for binding Cubemap arrays, which are read as float. Only supported in Forward+ and Mobile, not Compatibility.",
    ),
    (
        "samplerExternalOES",
        "External sampler type. Only supported in Compatibility/Android platform.",
    ),
];

const UNIFORM_HINTS: &[(&str, &str)] = &[
    ("source_color", "Used as color."),
    ("hint_normal", "Used as normalmap."),
    ("hint_default_white", "As value or albedo color, default to opaque white."),
    ("hint_default_black", "As value or albedo color, default to opaque black."),
    ("hint_default_transparent", "As value or albedo color, default to transparent black."),
    ("hint_anisotropy", "As flowmap, default to right."),
    ("repeat_enable", "Enabled texture repeating."),
    ("repeat_disable", "Disabled texture repeating."),
    ("hint_screen_texture", "Texture is the screen texture."),
    ("hint_depth_texture", "Texture is the depth texture."),
    (
        "hint_normal_roughness_texture",
        "Texture is the normal roughness texture (only supported in Forward+).",
    ),
    ("hint_roughness_r", ROUGHNESS_HINT_DOC),
    ("hint_roughness_g", ROUGHNESS_HINT_DOC),
    ("hint_roughness_b", ROUGHNESS_HINT_DOC),
    ("hint_roughness_a", ROUGHNESS_HINT_DOC),
    ("hint_roughness_normal", ROUGHNESS_HINT_DOC),
    ("hint_roughness_gray", ROUGHNESS_HINT_DOC),
    ("hint_filter_nearest", FILTER_HINT_DOC),
    ("hint_filter_linear", FILTER_HINT_DOC),
    ("hint_filter_nearest_mipmap_nearest", FILTER_HINT_DOC),
    ("hint_filter_linear_mipmap_nearest", FILTER_HINT_DOC),
    ("hint_filter_nearest_mipmap_linear", FILTER_HINT_DOC),
    ("hint_filter_linear_mipmap_linear", FILTER_HINT_DOC),
];

const ROUGHNESS_HINT_DOC: &str = "Used for roughness limiter on import (attempts reducing specular aliasing). `_normal` is a normal map that guides the roughness limiter, with roughness increasing in areas that have high-frequency detail.";

const FILTER_HINT_DOC: &str = "Enabled specified texture filtering.";

const FUNCTION_UNIFORM_HINTS: &[(&str, &str)] = &[
    ("hint_enum", "Displays int input as a dropdown widget in the editor."),
    ("hint_range", "Displays float input as a slider in the editor."),
];

const SHADER_TYPES: &[(&str, &str)] = &[
    ("canvas_item", "Canvas item shader, used for 2D rendering."),
    ("spatial", "Spatial shader, used for 3D rendering."),
    ("particles", "Particle shader, used for particle systems."),
    ("sky", "Sky shader, used for rendering skyboxes or skydomes."),
    ("fog", "Fog shader, used for rendering fog effects."),
];

const SPATIAL_RENDER_MODES: &[(&str, &str)] = &[
    ("blend_mix", "Mix blend mode (alpha is transparency), default."),
    ("blend_add", "Additive blend mode."),
    ("blend_sub", "Subtractive blend mode."),
    ("blend_mul", "Multiplicative blend mode."),
    (
        "blend_premul_alpha",
        "Premultiplied alpha blend mode (fully transparent = add, fully opaque = mix).",
    ),
    ("depth_draw_opaque", "Only draw depth for opaque geometry (not transparent)."),
    ("depth_draw_always", "Always draw depth (opaque and transparent)."),
    ("depth_draw_never", "Never draw depth."),
    ("depth_prepass_alpha", "Do opaque depth pre-pass for transparent geometry."),
    ("depth_test_disabled", "Disable depth testing."),
    (
        "sss_mode_skin",
        "Subsurface Scattering mode for skin (optimizes visuals for human skin, e.g. boosted red channel).",
    ),
    ("cull_back", "Cull back-faces (default)."),
    ("cull_front", "Cull front-faces."),
    ("cull_disabled", "Culling disabled (double sided)."),
    (
        "unshaded",
        "Result is just albedo. No lighting/shading happens in material, making it faster to render.",
    ),
    ("wireframe", "Geometry draws using lines (useful for troubleshooting)."),
    (
        "debug_shadow_splits",
        "Directional shadows are drawn using different colors for each split (useful for troubleshooting).",
    ),
    ("diffuse_burley", "Burley (Disney PBS) for diffuse (default)."),
    ("diffuse_lambert", "Lambert shading for diffuse."),
    ("diffuse_lambert_wrap", "Lambert-wrap shading (roughness-dependent) for diffuse."),
    ("diffuse_toon", "Toon shading for diffuse."),
    ("specular_schlick_ggx", "Schlick-GGX for direct light specular lobes (default)."),
    ("specular_toon", "Toon for direct light specular lobes."),
    (
        "specular_disabled",
        "Disable direct light specular lobes. Doesn't affect reflected light (use `SPECULAR = 0.0` instead).",
    ),
    (
        "skip_vertex_transform",
        "`VERTEX`, `NORMAL`, `TANGENT`, and `BITANGENT` need to be transformed manually in the `vertex()` function.",
    ),
    (
        "world_vertex_coords",
        "`VERTEX`, `NORMAL`, `TANGENT`, and `BITANGENT` are modified in world space instead of model space.",
    ),
    (
        "ensure_correct_normals",
        "Use when non-uniform scale is applied to mesh *(note: currently unimplemented)*.",
    ),
    (
        "shadows_disabled",
        "Disable computing shadows in shader. The shader will not receive shadows, but can still cast them.",
    ),
    ("ambient_light_disabled", "Disable contribution from ambient light and radiance map."),
    (
        "shadow_to_opacity",
        "Lighting modifies the alpha so shadowed areas are opaque and non-shadowed areas are transparent. Useful for overlaying shadows onto a camera feed in AR.",
    ),
    ("vertex_lighting", "Use vertex-based lighting instead of per-pixel lighting."),
    ("particle_trails", "Enables the trails when used on particles geometry."),
    (
        "alpha_to_coverage",
        "Alpha antialiasing mode, see [this PR](https://github.com/godotengine/godot/pull/40364) for more.",
    ),
    (
        "alpha_to_coverage_and_one",
        "Alpha antialiasing mode, see [this PR](https://github.com/godotengine/godot/pull/40364) for more.",
    ),
    (
        "fog_disabled",
        "Disable receiving depth-based or volumetric fog. Useful for `blend_add` materials like particles.",
    ),
];

const SPATIAL_GLOBAL_BUILTINS: &[(&str, &str, &str)] = &[
    (
        "TIME",
        "in float TIME",
        "Global time since the engine has started, in seconds. It repeats after every `3,600` seconds (which can be changed with the `rollover` setting). It's affected by `time_scale` but not by pausing. If you need a `TIME` variable that is not affected by time scale, add your own global shader uniform and update it each frame.",
    ),
    (
        "PI",
        "in float PI",
        "A `PI` constant (`3.141592`). A ratio of a circle's circumference to its diameter and amount of radians in half turn.",
    ),
    (
        "TAU",
        "in float TAU",
        "A `TAU` constant (`6.283185`). An equivalent of `PI * 2` and amount of radians in full turn.",
    ),
    (
        "E",
        "in float E",
        "An `E` constant (`2.718281`). Euler's number and a base of the natural logarithm.",
    ),
];

const SPATIAL_VERTEX_BUILTINS: &[(&str, &str, &str)] = &[
    (
        "MODEL_MATRIX",
        "in mat4 MODEL_MATRIX",
        "Local space to world space transform. World space is the coordinates you normally use in the editor.",
    ),
    (
        "CANVAS_MATRIX",
        "in mat4 CANVAS_MATRIX",
        "World space to canvas space transform. In canvas space the origin is the upper-left corner of the screen and coordinates ranging from `(0.0, 0.0)` to viewport size.",
    ),
    (
        "SCREEN_MATRIX",
        "in mat4 SCREEN_MATRIX",
        "Canvas space to clip space. In clip space coordinates range from `(-1.0, -1.0)` to `(1.0, 1.0)`.",
    ),
    ("VIEWPORT_SIZE", "in vec2 VIEWPORT_SIZE", "Size of viewport (in pixels)."),
    ("VIEW_MATRIX", "in mat4 VIEW_MATRIX", "World space to view space transform."),
    ("INV_VIEW_MATRIX", "in mat4 INV_VIEW_MATRIX", "View space to world space transform."),
    (
        "MAIN_CAM_INV_VIEW_MATRIX",
        "in mat4 MAIN_CAM_INV_VIEW_MATRIX",
        "View space to world space transform of camera used to draw the current viewport.",
    ),
    (
        "INV_PROJECTION_MATRIX",
        "in mat4 INV_PROJECTION_MATRIX",
        "Clip space to view space transform.",
    ),
    ("NODE_POSITION_WORLD", "in vec3 NODE_POSITION_WORLD", "Node position, in world space."),
    ("NODE_POSITION_VIEW", "in vec3 NODE_POSITION_VIEW", "Node position, in view space."),
    (
        "CAMERA_POSITION_WORLD",
        "in vec3 CAMERA_POSITION_WORLD",
        "Camera position, in world space.",
    ),
    (
        "CAMERA_DIRECTION_WORLD",
        "in vec3 CAMERA_DIRECTION_WORLD",
        "Camera direction, in world space.",
    ),
    (
        "CAMERA_VISIBLE_LAYERS",
        "in uint CAMERA_VISIBLE_LAYERS",
        "Cull layers of the camera rendering the current pass.",
    ),
    ("INSTANCE_ID", "in int INSTANCE_ID", "Instance ID for instancing."),
    ("INSTANCE_CUSTOM", "in vec4 INSTANCE_CUSTOM", "Instance custom data (for particles, mostly)."),
    (
        "VIEW_INDEX",
        "in int VIEW_INDEX",
        "`VIEW_MONO_LEFT` (`0`) for Mono (not multiview) or left eye, `VIEW_RIGHT` (`1`) for right eye.",
    ),
    ("VIEW_MONO_LEFT", "in int VIEW_MONO_LEFT", "Constant for Mono or left eye, always `0`."),
    ("VIEW_RIGHT", "in int VIEW_RIGHT", "Constant for right eye, always `1`."),
    (
        "EYE_OFFSET",
        "in vec3 EYE_OFFSET",
        "Position offset for the eye being rendered. Only applicable for multiview rendering.",
    ),
    (
        "VERTEX",
        "inout vec3 VERTEX",
        "Position of the vertex, in model space. In world space if `world_vertex_coords` is used.",
    ),
    ("VERTEX_ID", "in int VERTEX_ID", "The index of the current vertex in the vertex buffer."),
    (
        "NORMAL",
        "inout vec3 NORMAL",
        "Normal in model space. In world space if `world_vertex_coords` is used.",
    ),
    (
        "TANGENT",
        "inout vec3 TANGENT",
        "Tangent in model space. In world space if `world_vertex_coords` is used.",
    ),
    (
        "BINORMAL",
        "inout vec3 BINORMAL",
        "Binormal in model space. In world space if `world_vertex_coords` is used.",
    ),
    (
        "POSITION",
        "out vec4 POSITION",
        "If written to, overrides final vertex position in clip space.",
    ),
    ("UV", "inout vec2 UV", "UV main channel."),
    ("UV2", "inout vec2 UV2", "UV secondary channel."),
    ("COLOR", "inout vec4 COLOR", "Color from vertices."),
    ("ROUGHNESS", "out float ROUGHNESS", "Roughness for vertex lighting."),
    ("POINT_SIZE", "inout float POINT_SIZE", "Point size for point rendering."),
    (
        "MODELVIEW_MATRIX",
        "inout mat4 MODELVIEW_MATRIX",
        "Model/local space to view space transform (use if possible).",
    ),
    ("MODELVIEW_NORMAL_MATRIX", "inout mat3 MODELVIEW_NORMAL_MATRIX", ""),
    ("MODEL_NORMAL_MATRIX", "in mat3 MODEL_NORMAL_MATRIX", ""),
    (
        "PROJECTION_MATRIX",
        "inout mat4 PROJECTION_MATRIX",
        "View space to clip space transform.",
    ),
    ("BONE_INDICES", "in uvec4 BONE_INDICES", ""),
    ("BONE_WEIGHTS", "in vec4 BONE_WEIGHTS", ""),
    (
        "CUSTOM0",
        "in vec4 CUSTOM0",
        "Custom value from vertex primitive. When using extra UVs, `xy` is UV3 and `zw` is UV4.",
    ),
    (
        "CUSTOM1",
        "in vec4 CUSTOM1",
        "Custom value from vertex primitive. When using extra UVs, `xy` is UV5 and `zw` is UV6.",
    ),
    (
        "CUSTOM2",
        "in vec4 CUSTOM2",
        "Custom value from vertex primitive. When using extra UVs, `xy` is UV7 and `zw` is UV8.",
    ),
    ("CUSTOM3", "in vec4 CUSTOM3", "Custom value from vertex primitive."),
];

const SPATIAL_FRAGMENT_BUILTINS: &[(&str, &str, &str)] = &[
    ("VIEWPORT_SIZE", "in vec2 VIEWPORT_SIZE", "Size of viewport (in pixels)."),
    (
        "FRAGCOORD",
        "in vec4 FRAGCOORD",
        "Coordinate of pixel center in screen space. `xy` specifies position in window (origin is lower-left). `z` is fragment depth and output unless `DEPTH` is written.",
    ),
    (
        "FRONT_FACING",
        "in bool FRONT_FACING",
        "`true` if current face is front facing, `false` otherwise.",
    ),
    (
        "VIEW",
        "in vec3 VIEW",
        "Normalized vector from fragment position to camera (in view space).",
    ),
    ("UV", "in vec2 UV", "UV that comes from the `vertex()` function."),
    ("UV2", "in vec2 UV2", "UV2 that comes from the `vertex()` function."),
    ("COLOR", "in vec4 COLOR", "COLOR that comes from the `vertex()` function."),
    (
        "POINT_COORD",
        "in vec2 POINT_COORD",
        "Point coordinate for drawing points with `POINT_SIZE`.",
    ),
    ("MODEL_MATRIX", "in mat4 MODEL_MATRIX", "Model/local space to world space transform."),
    (
        "MODEL_NORMAL_MATRIX",
        "in mat3 MODEL_NORMAL_MATRIX",
        "`transpose(inverse(mat3(MODEL_MATRIX)))` for non-uniform scale. Matches `MODEL_MATRIX` otherwise.",
    ),
    ("VIEW_MATRIX", "in mat4 VIEW_MATRIX", "World space to view space transform."),
    ("INV_VIEW_MATRIX", "in mat4 INV_VIEW_MATRIX", "View space to world space transform."),
    ("PROJECTION_MATRIX", "in mat4 PROJECTION_MATRIX", "View space to clip space transform."),
    (
        "INV_PROJECTION_MATRIX",
        "in mat4 INV_PROJECTION_MATRIX",
        "Clip space to view space transform.",
    ),
    ("NODE_POSITION_WORLD", "in vec3 NODE_POSITION_WORLD", "Node position, in world space."),
    ("NODE_POSITION_VIEW", "in vec3 NODE_POSITION_VIEW", "Node position, in view space."),
    (
        "CAMERA_POSITION_WORLD",
        "in vec3 CAMERA_POSITION_WORLD",
        "Camera position, in world space.",
    ),
    (
        "CAMERA_DIRECTION_WORLD",
        "in vec3 CAMERA_DIRECTION_WORLD",
        "Camera direction, in world space.",
    ),
    (
        "CAMERA_VISIBLE_LAYERS",
        "in uint CAMERA_VISIBLE_LAYERS",
        "Cull layers of the camera rendering the current pass.",
    ),
    (
        "VERTEX",
        "in vec3 VERTEX",
        "`VERTEX` from `vertex()` transformed into view space. May differ if `skip_vertex_transform` is enabled.",
    ),
    (
        "LIGHT_VERTEX",
        "inout vec3 LIGHT_VERTEX",
        "Writable version of `VERTEX` for lighting calculations. Does not change fragment position.",
    ),
    (
        "VIEW_INDEX",
        "in int VIEW_INDEX",
        "`VIEW_MONO_LEFT` (0) or `VIEW_RIGHT` (1) for stereo rendering.",
    ),
    ("VIEW_MONO_LEFT", "in int VIEW_MONO_LEFT", "Constant for Mono or left eye, always `0`."),
    ("VIEW_RIGHT", "in int VIEW_RIGHT", "Constant for right eye, always `1`."),
    (
        "EYE_OFFSET",
        "in vec3 EYE_OFFSET",
        "Position offset for the eye being rendered in multiview rendering.",
    ),
    ("SCREEN_UV", "in vec2 SCREEN_UV", "Screen UV coordinate for current pixel."),
    (
        "DEPTH",
        "out float DEPTH",
        "Custom depth value `[0.0, 1.0]`. Must be set in all branches if written.",
    ),
    (
        "NORMAL",
        "inout vec3 NORMAL",
        "Normal from `vertex()`, in view space (unless `skip_vertex_transform` is used).",
    ),
    (
        "TANGENT",
        "inout vec3 TANGENT",
        "Tangent from `vertex()`, in view space (unless `skip_vertex_transform` is used).",
    ),
    (
        "BINORMAL",
        "inout vec3 BINORMAL",
        "Binormal from `vertex()`, in view space (unless `skip_vertex_transform` is used).",
    ),
    (
        "NORMAL_MAP",
        "out vec3 NORMAL_MAP",
        "Set normal here when reading from a texture instead of using `NORMAL`.",
    ),
    ("NORMAL_MAP_DEPTH", "out float NORMAL_MAP_DEPTH", "Depth from `NORMAL_MAP`. Defaults to `1.0`."),
    ("ALBEDO", "out vec3 ALBEDO", "Base color (default white)."),
    (
        "ALPHA",
        "out float ALPHA",
        "Alpha value `[0.0, 1.0]`. Triggers transparency pipeline if used.",
    ),
    ("ALPHA_SCISSOR_THRESHOLD", "out float ALPHA_SCISSOR_THRESHOLD", "Alpha discard threshold."),
    (
        "ALPHA_HASH_SCALE",
        "out float ALPHA_HASH_SCALE",
        "Alpha hash dither scale (higher = more visible pixels).",
    ),
    (
        "ALPHA_ANTIALIASING_EDGE",
        "out float ALPHA_ANTIALIASING_EDGE",
        "Alpha to coverage antialiasing edge threshold. Requires `alpha_to_coverage` render mode.",
    ),
    (
        "ALPHA_TEXTURE_COORDINATE",
        "out vec2 ALPHA_TEXTURE_COORDINATE",
        "UV for alpha-to-coverage AA. Typically `UV * texture_size`.",
    ),
    (
        "PREMUL_ALPHA_FACTOR",
        "out float PREMUL_ALPHA_FACTOR",
        "Premultiplied alpha lighting interaction. Used with `blend_premul_alpha`.",
    ),
    ("METALLIC", "out float METALLIC", "Metallic value `[0.0, 1.0]`."),
    (
        "SPECULAR",
        "out float SPECULAR",
        "Specular value (default `0.5`). `0.0` disables reflections.",
    ),
    ("ROUGHNESS", "out float ROUGHNESS", "Roughness value `[0.0, 1.0]`."),
    ("RIM", "out float RIM", "Rim lighting intensity `[0.0, 1.0]`."),
    ("RIM_TINT", "out float RIM_TINT", "Rim tint: `0.0` = white, `1.0` = albedo."),
    ("CLEARCOAT", "out float CLEARCOAT", "Adds a secondary specular layer."),
    ("CLEARCOAT_GLOSS", "out float CLEARCOAT_GLOSS", "Glossiness of clearcoat layer."),
    ("ANISOTROPY", "out float ANISOTROPY", "Distortion factor for specular highlight."),
    (
        "ANISOTROPY_FLOW",
        "out vec2 ANISOTROPY_FLOW",
        "Direction of anisotropy flow (e.g. from flowmaps).",
    ),
    ("SSS_STRENGTH", "out float SSS_STRENGTH", "Subsurface scattering strength."),
    (
        "SSS_TRANSMITTANCE_COLOR",
        "out vec4 SSS_TRANSMITTANCE_COLOR",
        "Color for subsurface transmittance effect.",
    ),
    (
        "SSS_TRANSMITTANCE_DEPTH",
        "out float SSS_TRANSMITTANCE_DEPTH",
        "Depth for transmittance penetration.",
    ),
    (
        "SSS_TRANSMITTANCE_BOOST",
        "out float SSS_TRANSMITTANCE_BOOST",
        "Boost to force SSS to appear even when lit.",
    ),
    (
        "BACKLIGHT",
        "inout vec3 BACKLIGHT",
        "Backlighting color for light received on opposite side of surface.",
    ),
    ("AO", "out float AO", "Ambient occlusion intensity (for pre-baked AO)."),
    (
        "AO_LIGHT_AFFECT",
        "out float AO_LIGHT_AFFECT",
        "How much AO dims direct lighting. `[0.0, 1.0]`.",
    ),
    ("EMISSION", "out vec3 EMISSION", "Emissive color. Can exceed `1.0` for HDR."),
    (
        "FOG",
        "out vec4 FOG",
        "If written to, blends final color with `FOG.rgb` using `FOG.a`.",
    ),
    ("RADIANCE", "out vec4 RADIANCE", "Environment map radiance override."),
    ("IRRADIANCE", "out vec4 IRRADIANCE", "Environment map irradiance override."),
];

const SPATIAL_LIGHT_BUILTINS: &[(&str, &str, &str)] = &[
    ("VIEWPORT_SIZE", "in vec2 VIEWPORT_SIZE", "Size of viewport (in pixels)."),
    (
        "FRAGCOORD",
        "in vec4 FRAGCOORD",
        "Pixel center coordinate in screen space. `xy` is position in window, `z` is depth unless `DEPTH` is used. Origin is lower-left.",
    ),
    ("MODEL_MATRIX", "in mat4 MODEL_MATRIX", "Model/local space to world space transform."),
    ("INV_VIEW_MATRIX", "in mat4 INV_VIEW_MATRIX", "View space to world space transform."),
    ("VIEW_MATRIX", "in mat4 VIEW_MATRIX", "World space to view space transform."),
    ("PROJECTION_MATRIX", "in mat4 PROJECTION_MATRIX", "View space to clip space transform."),
    (
        "INV_PROJECTION_MATRIX",
        "in mat4 INV_PROJECTION_MATRIX",
        "Clip space to view space transform.",
    ),
    ("NORMAL", "in vec3 NORMAL", "Normal vector, in view space."),
    ("SCREEN_UV", "in vec2 SCREEN_UV", "Screen UV coordinate for current pixel."),
    ("UV", "in vec2 UV", "UV that comes from the `vertex()` function."),
    ("UV2", "in vec2 UV2", "UV2 that comes from the `vertex()` function."),
    ("VIEW", "in vec3 VIEW", "View vector, in view space."),
    ("LIGHT", "in vec3 LIGHT", "Light vector, in view space."),
    (
        "LIGHT_COLOR",
        "in vec3 LIGHT_COLOR",
        "`light_color * light_energy * PI`. Includes `PI` because physically-based models divide by `PI`.",
    ),
    (
        "SPECULAR_AMOUNT",
        "in float SPECULAR_AMOUNT",
        "`2.0 * light_specular` for Omni and Spot lights. `1.0` for Directional lights.",
    ),
    (
        "LIGHT_IS_DIRECTIONAL",
        "in bool LIGHT_IS_DIRECTIONAL",
        "`true` if this pass is a DirectionalLight3D.",
    ),
    ("ATTENUATION", "in float ATTENUATION", "Attenuation from distance or shadow."),
    ("ALBEDO", "in vec3 ALBEDO", "Base albedo color."),
    ("BACKLIGHT", "in vec3 BACKLIGHT", "Backlighting color."),
    ("METALLIC", "in float METALLIC", "Metallic factor."),
    ("ROUGHNESS", "in float ROUGHNESS", "Roughness factor."),
    ("DIFFUSE_LIGHT", "out vec3 DIFFUSE_LIGHT", "Diffuse light result."),
    ("SPECULAR_LIGHT", "out vec3 SPECULAR_LIGHT", "Specular light result."),
    (
        "ALPHA",
        "out float ALPHA",
        "Alpha value `[0.0, 1.0]`. Enables transparent pipeline if written.",
    ),
];
