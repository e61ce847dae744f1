use lite_upscale_application::{UpscaleOutput, UpscalePlan};
use lite_upscale_domain::{RasterImage, ScaleResult};
use serde_json::json;

pub fn present_output(output: &UpscaleOutput) -> String {
    let preview = output.preview.dimensions();
    match &output.result {
        ScaleResult::Direct(direct) => format!(
            "direct result {} (preview {preview})",
            direct.image().dimensions()
        ),
        ScaleResult::Virtual(virtual_result) => format!(
            "virtual result {} held at {} (preview {preview})",
            virtual_result.target(),
            virtual_result.intermediate().dimensions()
        ),
    }
}

pub fn present_materialized(image: &RasterImage, path: &str) -> String {
    format!(
        "exported {} ({} pixels) to {path}",
        image.dimensions(),
        image.pixel_count()
    )
}

pub fn present_plan_json(plan: &UpscalePlan) -> String {
    json!({
        "source": plan.source,
        "target": plan.target,
        "target_pixels": plan.target.pixel_count(),
        "kind": plan.kind,
        "materialized": plan.materialized,
        "planned_steps": plan.planned_steps,
        "preview": plan.preview,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use lite_upscale_domain::{Dimensions, ResultKind};
    use serde_json::Value;

    use super::*;

    #[test]
    fn plan_json_carries_policy_decision() {
        let plan = UpscalePlan {
            source: Dimensions::new(1000, 800).expect("dims"),
            target: Dimensions::new(8000, 6400).expect("dims"),
            kind: ResultKind::Virtual,
            materialized: Dimensions::new(7071, 5656).expect("dims"),
            planned_steps: 3,
            preview: Dimensions::new(1024, 819).expect("dims"),
        };

        let value: Value = serde_json::from_str(&present_plan_json(&plan)).expect("json");

        assert_eq!(value["kind"], "virtual");
        assert_eq!(value["target"]["width"], 8000);
        assert_eq!(value["target_pixels"], 51_200_000);
        assert_eq!(value["preview"]["height"], 819);
    }

    #[test]
    fn materialized_summary_lists_size() {
        let image = RasterImage::filled(3, 2, [0, 0, 0, 255]).expect("image");
        assert_eq!(
            present_materialized(&image, "out.png"),
            "exported 3x2 (6 pixels) to out.png"
        );
    }
}
