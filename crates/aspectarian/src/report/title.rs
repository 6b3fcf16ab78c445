use crate::aspects::{AspectInstance, PointRef};

/// Display label: explicit label, then the body table, then the raw identifier.
pub fn side_label(point: &PointRef) -> String {
    if let Some(label) = point.label.as_deref().filter(|l| !l.trim().is_empty()) {
        return label.trim().to_string();
    }
    match point.body {
        Some(body) => body.label().to_string(),
        None => point.name.clone(),
    }
}

/// `"{label} in {sign} house {N}"`, leaving out whatever is unknown.
pub fn render_side(point: &PointRef) -> String {
    let mut out = side_label(point);
    if let Some(sign) = point.sign.as_deref().filter(|s| !s.trim().is_empty()) {
        out.push_str(" in ");
        out.push_str(sign.trim());
    }
    let is_angle = point.body.map(|b| b.is_angle()).unwrap_or(false);
    if let (false, Some(house)) = (is_angle, point.house) {
        out.push_str(&format!(" house {}", house));
    }
    out
}

/// Natural-language title for an aspect, e.g.
/// `"Sun in Leo house 5 in square to Saturn in Scorpio house 8"`.
pub fn title(instance: &AspectInstance) -> String {
    format!(
        "{} {} {}",
        render_side(&instance.p1),
        instance.aspect.connector(),
        render_side(&instance.p2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::AspectType;

    fn instance(p1: PointRef, p2: PointRef, aspect: AspectType) -> AspectInstance {
        AspectInstance {
            aspect,
            p1,
            p2,
            score: 5.0,
        }
    }

    #[test]
    fn test_full_title() {
        let t = title(&instance(
            PointRef::named("sun").with_sign("Leo").with_house(Some(5)),
            PointRef::named("saturn").with_sign("Scorpio").with_house(Some(8)),
            AspectType::Square,
        ));
        assert_eq!(t, "Sun in Leo house 5 in square to Saturn in Scorpio house 8");
    }

    #[test]
    fn test_angle_point_has_no_house_segment() {
        let mut asc = PointRef::named("ascendant").with_sign("Aries");
        // even if a house slipped through, it is not rendered
        asc.house = Some(1);
        let t = title(&instance(asc, PointRef::named("moon"), AspectType::Conjunction));
        assert_eq!(t, "Ascendant in Aries in conjunction with Moon");
    }

    #[test]
    fn test_label_fallbacks() {
        let explicit = PointRef::named("sun").with_label("Sol");
        assert_eq!(side_label(&explicit), "Sol");
        assert_eq!(side_label(&PointRef::named("trueNode")), "North Node");
        assert_eq!(side_label(&PointRef::named("Vertex")), "Vertex");
    }

    #[test]
    fn test_missing_sign_is_omitted() {
        let side = render_side(&PointRef::named("mars").with_house(Some(7)));
        assert_eq!(side, "Mars house 7");
    }
}
