use super::theme;
use arcus_core::cache::CacheStats;
use arcus_core::geometry::{self, Rect};
use arcus_core::{PixmapCache, ProgressState, RingColor};
use cairo::{Context, Format, ImageSurface};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::path::Path;

const PEN_WIDTH: f64 = 1.0;

thread_local! {
    // GTK paints on one thread only, so every ring on it shares this.
    static SURFACES: RefCell<PixmapCache<ImageSurface>> = RefCell::new(PixmapCache::new());
}

pub fn cache_stats() -> CacheStats {
    SURFACES.with(|cache| cache.borrow().stats())
}

/// Paints `state` centered in a `width` x `height` area, rendering the ring
/// bitmap only when no bitmap with the same parameters is cached.
pub fn paint(
    cr: &Context,
    state: &ProgressState,
    width: i32,
    height: i32,
) -> Result<(), cairo::Error> {
    if Rect::from_size(width as f64, height as f64).is_empty() {
        return Ok(());
    }

    let key = state.cache_key(width, height);
    let surface = SURFACES.with(|cache| {
        cache
            .borrow_mut()
            .get_or_try_insert_with(&key, || render_ring(state, width, height))
    })?;

    // whole-pixel offsets so cairo copies the bitmap without resampling
    let x = ((width - surface.width()) / 2) as f64;
    let y = ((height - surface.height()) / 2) as f64;
    cr.set_source_surface(&surface, x, y)?;
    cr.paint()
}

/// Renders the ring into a fresh transparent bitmap the size of the square
/// centered in `width` x `height`. Also reports the bitmap's size in bytes.
pub fn render_ring(
    state: &ProgressState,
    width: i32,
    height: i32,
) -> Result<(ImageSurface, usize), cairo::Error> {
    let square = Rect::from_size(width as f64, height as f64).squared();
    let (w, h) = (square.width as i32, square.height as i32);

    let surface = ImageSurface::create(Format::ARgb32, w, h)?;
    {
        let cr = Context::new(&surface)?;
        draw_ring(&cr, state, Rect::from_size(w as f64, h as f64))?;
    }
    surface.flush();

    let bytes = surface.stride() as usize * h as usize;
    Ok((surface, bytes))
}

/// Writes a single uncached frame of `state` to a PNG file.
pub fn write_png(
    state: &ProgressState,
    width: i32,
    height: i32,
    path: &Path,
) -> anyhow::Result<()> {
    let (surface, _) = render_ring(state, width, height)?;
    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    Ok(())
}

fn set_source(cr: &Context, color: RingColor) {
    let (r, g, b, a) = color.to_f64_components();
    cr.set_source_rgba(r, g, b, a);
}

fn draw_ring(cr: &Context, state: &ProgressState, bounds: Rect) -> Result<(), cairo::Error> {
    let ring = geometry::ring_bounds(bounds, state.outer_radius());
    let center = ring.center();
    let radius = ring.width / 2.0;
    cr.set_line_width(PEN_WIDTH);

    // track
    set_source(cr, theme::track_color());
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill_preserve()?;
    cr.stroke()?;

    let arc = state.arc();
    if !arc.is_empty() {
        let (start, end) = arc.to_screen_radians();
        set_source(cr, state.color());
        cr.move_to(center.x, center.y);
        if arc.is_clockwise() {
            cr.arc(center.x, center.y, radius, start, end);
        } else {
            cr.arc_negative(center.x, center.y, radius, start, end);
        }
        cr.close_path();
        cr.fill_preserve()?;
        cr.stroke()?;
    }

    let hole = geometry::hole_radius(ring, state.inner_radius());
    set_source(cr, theme::hole_color());
    cr.arc(center.x, center.y, hole, 0.0, 2.0 * PI);
    cr.fill_preserve()?;
    set_source(cr, theme::outline_color());
    cr.stroke()?;

    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.stroke()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcus_core::geometry::Point;
    use std::time::Instant;

    const TRANSPARENT: u32 = 0;
    const WHITE: u32 = 0xffff_ffff;
    const TRACK: u32 = 0xffe1_e1e1;

    fn pixel(surface: &mut ImageSurface, p: Point) -> u32 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = p.y as usize * stride + p.x as usize * 4;
        u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    fn determinate(visible: i32, maximum: i32) -> ProgressState {
        let now = Instant::now();
        let mut state = ProgressState::new(now);
        state.set_maximum(maximum, now);
        state.set_visible_value(visible);
        state
    }

    // 202x202 puts the ring at (1, 1, 200, 200): center (101, 101), radius
    // 100, default hole radius 60.
    fn ring_point(degrees: f64) -> Point {
        let rad = degrees.to_radians();
        Point::new(101.0 + 80.0 * rad.cos(), 101.0 - 80.0 * rad.sin())
    }

    fn painted_row(state: &ProgressState, width: i32, height: i32, y: f64) -> Vec<u32> {
        let mut target = ImageSurface::create(Format::ARgb32, width, height).unwrap();
        {
            let cr = Context::new(&target).unwrap();
            paint(&cr, state, width, height).unwrap();
        }
        target.flush();
        (0..width)
            .map(|x| pixel(&mut target, Point::new(x as f64, y)))
            .collect()
    }

    #[test]
    fn test_half_progress_fills_right_side() {
        let state = determinate(50, 100);
        let (mut surface, bytes) = render_ring(&state, 202, 202).unwrap();
        assert_eq!((surface.width(), surface.height()), (202, 202));
        assert_eq!(bytes, surface.stride() as usize * 202);

        let color = state.color().argb();
        assert_eq!(pixel(&mut surface, ring_point(0.0)), color);
        assert_eq!(pixel(&mut surface, ring_point(45.0)), color);
        assert_eq!(pixel(&mut surface, ring_point(180.0)), TRACK);
        assert_eq!(pixel(&mut surface, ring_point(135.0)), TRACK);
        assert_eq!(pixel(&mut surface, Point::new(101.0, 101.0)), WHITE);
        assert_eq!(pixel(&mut surface, Point::new(2.0, 2.0)), TRANSPARENT);
    }

    #[test]
    fn test_spinner_draws_short_arc() {
        let state = ProgressState::new(Instant::now());
        let (mut surface, _) = render_ring(&state, 202, 202).unwrap();

        let color = state.color().argb();
        assert_eq!(pixel(&mut surface, ring_point(27.0)), color);
        assert_eq!(pixel(&mut surface, ring_point(120.0)), TRACK);
        assert_eq!(pixel(&mut surface, ring_point(-60.0)), TRACK);
    }

    #[test]
    fn test_bitmap_is_centered_square() {
        let state = determinate(0, 10);
        let (surface, _) = render_ring(&state, 300, 120).unwrap();
        assert_eq!((surface.width(), surface.height()), (120, 120));
    }

    #[test]
    fn test_identical_params_hit_cache() {
        let state = determinate(30, 100);
        let target = ImageSurface::create(Format::ARgb32, 240, 200).unwrap();
        let cr = Context::new(&target).unwrap();

        let before = cache_stats();
        paint(&cr, &state, 240, 200).unwrap();
        paint(&cr, &state, 240, 200).unwrap();
        let after = cache_stats();
        assert_eq!(after.misses - before.misses, 1);
        assert_eq!(after.hits - before.hits, 1);

        let mut moved = state.clone();
        moved.set_visible_value(31);
        paint(&cr, &moved, 240, 200).unwrap();
        assert_eq!(cache_stats().misses - before.misses, 2);
    }

    #[test]
    fn test_paint_blits_centered() {
        let state = determinate(100, 100);
        let mut target = ImageSurface::create(Format::ARgb32, 302, 202).unwrap();
        {
            let cr = Context::new(&target).unwrap();
            paint(&cr, &state, 302, 202).unwrap();
        }
        target.flush();

        assert_eq!(pixel(&mut target, Point::new(151.0, 101.0)), WHITE);
        assert_eq!(pixel(&mut target, Point::new(151.0 - 80.0, 101.0)), state.color().argb());
        assert_eq!(pixel(&mut target, Point::new(10.0, 101.0)), TRANSPARENT);
    }

    #[test]
    fn test_odd_margin_blits_on_whole_pixels() {
        let state = determinate(100, 100);
        let even = painted_row(&state, 302, 202, 101.0);
        let odd = painted_row(&state, 303, 202, 101.0);

        // both place the 202px bitmap at x = 50
        assert_eq!(&odd[..302], &even[..]);
        assert_eq!(odd[53], state.color().argb());
        assert_eq!(odd[302], TRANSPARENT);
    }

    #[test]
    fn test_empty_area_paints_nothing() {
        let state = determinate(1, 2);
        let target = ImageSurface::create(Format::ARgb32, 4, 4).unwrap();
        let cr = Context::new(&target).unwrap();
        let before = cache_stats();
        paint(&cr, &state, 0, 40).unwrap();
        assert_eq!(cache_stats(), before);
    }
}
