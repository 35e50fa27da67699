use super::context::AppContext;

/// One slider of the debug panel.
#[derive(Clone, Copy)]
pub struct DebugBinding {
    pub folder: &'static str,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub get: fn(&AppContext) -> f32,
    pub set: fn(&mut AppContext, f32),
}

impl DebugBinding {
    pub fn value(&self, ctx: &AppContext) -> f32 {
        (self.get)(ctx)
    }

    pub fn apply(&self, ctx: &mut AppContext, value: f32) {
        if !value.is_finite() {
            log::warn!("{}/{}: ignoring {value}", self.folder, self.label);
            return;
        }
        (self.set)(ctx, value.clamp(self.min, self.max));
    }
}

impl std::fmt::Debug for DebugBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugBinding")
            .field("folder", &self.folder)
            .field("label", &self.label)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .finish_non_exhaustive()
    }
}

const LIGHT: &str = "Light";
const MODEL_ROTATION: &str = "Model rotation";
const MODEL_POSITION: &str = "Model position";
const CAMERA: &str = "Home camera";

const fn slider(
    folder: &'static str,
    label: &'static str,
    (min, max, step): (f32, f32, f32),
    get: fn(&AppContext) -> f32,
    set: fn(&mut AppContext, f32),
) -> DebugBinding {
    DebugBinding { folder, label, min, max, step, get, set }
}

/// Sliders shown in the debug panel, grouped by folder in display order.
pub fn scene_bindings() -> Vec<DebugBinding> {
    vec![
        slider(LIGHT, "x", (-6.0, 6.0, 0.01), |c| c.settings().key_light.position.x, |c, v| c.settings_mut().key_light.position.x = v),
        slider(LIGHT, "y", (-3.0, 15.0, 0.01), |c| c.settings().key_light.position.y, |c, v| c.settings_mut().key_light.position.y = v),
        slider(LIGHT, "z", (-10.0, 10.0, 0.01), |c| c.settings().key_light.position.z, |c, v| c.settings_mut().key_light.position.z = v),
        slider(LIGHT, "intensity", (0.0, 10.0, 0.01), |c| c.settings().key_light.intensity, |c, v| c.settings_mut().key_light.intensity = v),
        slider(LIGHT, "ambient", (0.0, 2.0, 0.01), |c| c.settings().ambient.intensity, |c, v| c.settings_mut().ambient.intensity = v),

        slider(MODEL_ROTATION, "x", (0.0, 9.0, 0.01), |c| c.settings().model.rotation.x, |c, v| c.settings_mut().model.rotation.x = v),
        slider(MODEL_ROTATION, "y", (0.0, 9.0, 0.01), |c| c.settings().model.rotation.y, |c, v| c.settings_mut().model.rotation.y = v),
        slider(MODEL_ROTATION, "z", (0.0, 9.0, 0.01), |c| c.settings().model.rotation.z, |c, v| c.settings_mut().model.rotation.z = v),

        slider(MODEL_POSITION, "x", (-6.0, 6.0, 0.01), |c| c.settings().model.position.x, |c, v| c.settings_mut().model.position.x = v),
        slider(MODEL_POSITION, "y", (-3.0, 3.0, 0.01), |c| c.settings().model.position.y, |c, v| c.settings_mut().model.position.y = v),
        slider(MODEL_POSITION, "z", (-3.0, 3.0, 0.01), |c| c.settings().model.position.z, |c, v| c.settings_mut().model.position.z = v),
        slider(MODEL_POSITION, "scale", (0.1, 3.0, 0.01), |c| c.settings().model.scale, |c, v| c.settings_mut().model.scale = v),

        slider(CAMERA, "x", (-10.0, 10.0, 0.01), |c| c.registry().home_camera().position.x, |c, v| c.registry_mut().home_camera_mut().position.x = v),
        slider(CAMERA, "y", (-10.0, 10.0, 0.01), |c| c.registry().home_camera().position.y, |c, v| c.registry_mut().home_camera_mut().position.y = v),
        slider(CAMERA, "z", (-10.0, 10.0, 0.01), |c| c.registry().home_camera().position.z, |c, v| c.registry_mut().home_camera_mut().position.z = v),
    ]
}

/// Bindings grouped by folder in first-appearance order, each slider keeping
/// its index into the flat list.
pub fn folders(bindings: &[DebugBinding]) -> Vec<(&'static str, Vec<(usize, DebugBinding)>)> {
    let mut out: Vec<(&'static str, Vec<(usize, DebugBinding)>)> = Vec::new();
    for (i, b) in bindings.iter().enumerate() {
        match out.iter_mut().find(|(folder, _)| *folder == b.folder) {
            Some((_, items)) => items.push((i, *b)),
            None => out.push((b.folder, vec![(i, *b)])),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::navigation::context::Viewport;

    fn ctx() -> AppContext {
        AppContext::from_config(&ViewerConfig::default(), Viewport::new(800, 600))
    }

    fn find(bindings: &[DebugBinding], folder: &str, label: &str) -> DebugBinding {
        *bindings
            .iter()
            .find(|b| b.folder == folder && b.label == label)
            .unwrap()
    }

    #[test]
    fn setters_write_through_and_clamp() {
        let mut ctx = ctx();
        let bindings = scene_bindings();

        let light_x = find(&bindings, LIGHT, "x");
        light_x.apply(&mut ctx, 2.5);
        assert_eq!(ctx.settings().key_light.position.x, 2.5);
        assert_eq!(light_x.value(&ctx), 2.5);

        let rot_y = find(&bindings, MODEL_ROTATION, "y");
        rot_y.apply(&mut ctx, 42.0);
        assert_eq!(ctx.settings().model.rotation.y, 9.0);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut ctx = ctx();
        let cam_y = find(&scene_bindings(), CAMERA, "y");
        let before = cam_y.value(&ctx);

        cam_y.apply(&mut ctx, f32::NAN);
        assert_eq!(cam_y.value(&ctx), before);
    }

    #[test]
    fn every_range_is_well_formed() {
        for b in scene_bindings() {
            assert!(b.min < b.max && b.step > 0.0, "{b:?}");
        }
    }

    #[test]
    fn folders_keep_display_order_and_flat_indices() {
        let bindings = scene_bindings();
        let grouped = folders(&bindings);

        let names: Vec<_> = grouped.iter().map(|(f, _)| *f).collect();
        assert_eq!(names, [LIGHT, MODEL_ROTATION, MODEL_POSITION, CAMERA]);

        let flat: Vec<usize> = grouped.iter().flat_map(|(_, items)| items.iter().map(|(i, _)| *i)).collect();
        assert_eq!(flat, (0..bindings.len()).collect::<Vec<_>>());
    }
}
