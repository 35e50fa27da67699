//! Scene assets: the glTF model, the equirectangular background and the
//! viewer config. Decoding is plain CPU work; fetching needs the browser.

use anyhow::{Context, Result, anyhow};
use glam::Mat4;
use image::RgbaImage;

use crate::render::renderer::mesh::CpuMesh;
use crate::render::renderer::vertex::Vertex;

/// One drawable primitive of the model, already placed in model space.
#[derive(Debug, Clone)]
pub struct ModelPart {
    pub mesh: CpuMesh,
    pub transform: Mat4,
    pub base_color: [f32; 4],
    /// Index into [`ModelData::textures`].
    pub texture: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub parts: Vec<ModelPart>,
    pub textures: Vec<RgbaImage>,
}

pub fn decode_model(bytes: &[u8]) -> Result<ModelData> {
    let (doc, buffers, images) = gltf::import_slice(bytes).context("decoding glTF")?;

    // glTF image index -> position in `textures`
    let mut textures = Vec::new();
    let remap: Vec<Option<usize>> = images
        .into_iter()
        .enumerate()
        .map(|(i, img)| match to_rgba(img) {
            Ok(rgba) => {
                textures.push(rgba);
                Some(textures.len() - 1)
            }
            Err(e) => {
                log::warn!("skipping model image #{i}: {e:#}");
                None
            }
        })
        .collect();

    let scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or_else(|| anyhow!("glTF has no scene"))?;

    let mut parts = Vec::new();
    for node in scene.nodes() {
        collect_parts(&node, Mat4::IDENTITY, &buffers, &remap, &mut parts)?;
    }

    log::info!("model decoded: {} parts, {} textures", parts.len(), textures.len());
    Ok(ModelData { parts, textures })
}

fn collect_parts(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    remap: &[Option<usize>],
    out: &mut Vec<ModelPart>,
) -> Result<()> {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("skipping non-triangle primitive of mesh {:?}", mesh.name());
                continue;
            }

            let reader = prim.reader(|b| buffers.get(b.index()).map(|data| &data[..]));
            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .with_context(|| format!("primitive of mesh {:?} has no positions", mesh.name()))?
                .collect();
            let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(Iterator::collect);
            let uvs: Option<Vec<[f32; 2]>> = reader.read_tex_coords(0).map(|t| t.into_f32().collect());
            let indices: Vec<u32> = match reader.read_indices() {
                Some(idx) => idx.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let vertices = positions
                .iter()
                .enumerate()
                .map(|(i, &p)| {
                    let n = normals.as_ref().and_then(|n| n.get(i).copied()).unwrap_or_default();
                    let uv = uvs.as_ref().and_then(|t| t.get(i).copied()).unwrap_or_default();
                    Vertex::new(p, n, uv)
                })
                .collect();

            let mut cpu = CpuMesh::new(vertices, indices);
            if normals.is_none() {
                cpu.recompute_normals();
            }

            let pbr = prim.material().pbr_metallic_roughness();
            let texture = pbr
                .base_color_texture()
                .and_then(|info| remap.get(info.texture().source().index()).copied().flatten());

            out.push(ModelPart {
                mesh: cpu,
                transform,
                base_color: pbr.base_color_factor(),
                texture,
            });
        }
    }

    for child in node.children() {
        collect_parts(&child, transform, buffers, remap, out)?;
    }
    Ok(())
}

fn to_rgba(img: gltf::image::Data) -> Result<RgbaImage> {
    use gltf::image::Format;

    let (w, h) = (img.width, img.height);
    let pixels = match img.format {
        Format::R8G8B8A8 => img.pixels,
        Format::R8G8B8 => img
            .pixels
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        other => return Err(anyhow!("unsupported pixel format {other:?}")),
    };

    RgbaImage::from_raw(w, h, pixels).ok_or_else(|| anyhow!("pixel buffer does not match {w}x{h}"))
}

/// Equirectangular panorama as RGBA8.
pub fn decode_background(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes).context("decoding background image")?;
    Ok(img.into_rgba8())
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use fetch::*;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod fetch {
    use anyhow::{Context, Result, bail};
    use gloo_net::http::Request;

    use crate::config::{CONFIG_URL, ViewerConfig};

    pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
        let resp = Request::get(url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("requesting {url}"))?;

        if !resp.ok() {
            bail!("{url}: HTTP {}", resp.status());
        }

        resp.binary()
            .await
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("reading body of {url}"))
    }

    /// Viewer config, or the built-in scene when it cannot be loaded.
    pub async fn load_config() -> ViewerConfig {
        let fetched = async {
            let resp = Request::get(CONFIG_URL)
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            if !resp.ok() {
                bail!("{CONFIG_URL}: HTTP {}", resp.status());
            }
            resp.json::<ViewerConfig>()
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))
                .context("parsing viewer config")
        };

        match fetched.await {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("using built-in scene: {e:#}");
                ViewerConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "children": [1], "translation": [0, 2, 0] }, { "mesh": 0, "scale": [2, 2, 2] }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 }] }],
        "materials": [{ "pbrMetallicRoughness": { "baseColorFactor": [1, 0, 0, 1] } }],
        "buffers": [{
            "byteLength": 44,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA="
        }],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
            { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0, 0, 0], "max": [1, 1, 0] },
            { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
        ]
    }"#;

    #[test]
    fn triangle_model_keeps_node_transforms_and_material() {
        let model = decode_model(TRIANGLE_GLTF.as_bytes()).unwrap();
        assert_eq!(model.parts.len(), 1);

        let part = &model.parts[0];
        assert_eq!(part.mesh.indices, vec![0, 1, 2]);
        assert_eq!(part.base_color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(part.texture, None);
        // normals were missing and got rebuilt from the winding
        assert_eq!(part.mesh.vertices[0].normal, [0.0, 0.0, 1.0]);

        let top = part.transform.transform_point3(glam::Vec3::new(0.0, 1.0, 0.0));
        assert!(top.abs_diff_eq(glam::Vec3::new(0.0, 4.0, 0.0), 1e-6));
    }

    #[test]
    fn garbage_is_an_error_not_a_panic() {
        let err = decode_model(b"not a model").unwrap_err();
        assert!(format!("{err:#}").contains("decoding glTF"));
        assert!(decode_background(b"nope").is_err());
    }

    #[test]
    fn background_decodes_to_rgba() {
        let mut png = Vec::new();
        image::RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]))
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let bg = decode_background(&png).unwrap();
        assert_eq!(bg.dimensions(), (4, 2));
        assert_eq!(bg.get_pixel(3, 1).0, [10, 20, 30, 255]);
    }
}
