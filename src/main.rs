use dualpath::{Backend, PathSegment, Shape, V2};

fn main() {
    env_logger::init();

    // A rounded tab: straight sides, a smooth top and a quarter-arc corner
    let mut shape = Shape::new(Backend::Svg);
    let path = shape.path_mut();
    path.on_change(|| log::debug!("Path changed; the shape needs repainting"));
    path.append(PathSegment::move_to(0.0, 10.0));
    path.append(PathSegment::rel_vertical_line_to(-6.0));
    path.append(PathSegment::quadratic_bezier(0.0, 0.0, 4.0, 0.0));
    path.append(PathSegment::rel_smooth_quadratic_bezier(4.0, 0.0));
    path.append(PathSegment::rel_elliptical_arc(
        2.0, 2.0, 0.0, false, true, 2.0, 2.0,
    ));
    path.append(PathSegment::vertical_line_to(10.0));
    path.append(PathSegment::close());

    println!("SVG: {}", shape.to_xml());
    shape.set_backend(Backend::Vml);
    println!("VML: {}", shape.to_xml());

    let circle = Shape::circle(Backend::Svg, V2::new(5.0, 5.0), 5.0);
    println!("{:?}", circle.path());
}
