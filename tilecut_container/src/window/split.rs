use tilecut_core::{BBox, Tile};

/// Partitions the read window of `tile` into boxes inside the pyramid.
///
/// Without pixelbuffer, or if the buffered extent stays off the pyramid edges,
/// the result is the buffered extent itself. Otherwise the extent is clipped to
/// the pyramid; for global pyramids, the parts reaching past the antimeridian
/// come back as extra boxes on the opposite side.
///
/// ```
/// use tilecut_container::split_read_window;
/// use tilecut_core::TilePyramid;
///
/// let tile = TilePyramid::geodetic().tile(1, 0, 0).unwrap().with_pixelbuffer(2);
/// let boxes = split_read_window(&tile);
/// assert_eq!(boxes.len(), 2);
/// assert_eq!(boxes[1].right, 180.0);
/// ```
pub fn split_read_window(tile: &Tile) -> Vec<BBox> {
	let buffered = tile.buffered_bounds();
	let bounds = tile.pyramid().bounds();

	let on_edge = buffered.left <= bounds.left
		|| buffered.bottom <= bounds.bottom
		|| buffered.right >= bounds.right
		|| buffered.top >= bounds.top;

	if tile.pixelbuffer() == 0 || !on_edge {
		return vec![buffered];
	}

	let boxes = tile.pyramid().clip_bounds(&buffered);
	log::debug!("{tile} reaches the pyramid edge, reading {} boxes", boxes.len());
	boxes
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use rstest::rstest;
	use tilecut_core::TilePyramid;

	fn area(boxes: &[BBox]) -> f64 {
		boxes.iter().map(|b| b.width() * b.height()).sum()
	}

	#[test]
	fn inner_tile_is_not_split() {
		let tile = TilePyramid::geodetic().tile(3, 2, 5).unwrap().with_pixelbuffer(10);
		assert_eq!(split_read_window(&tile), vec![tile.buffered_bounds()]);
	}

	#[test]
	fn edge_tile_without_buffer_is_not_split() {
		let tile = TilePyramid::geodetic().tile(1, 0, 0).unwrap();
		assert_eq!(split_read_window(&tile), vec![tile.bounds()]);
	}

	#[test]
	fn antimeridian_left() {
		let tile = TilePyramid::geodetic().tile(1, 0, 0).unwrap().with_pixelbuffer(2);
		let boxes = split_read_window(&tile);
		assert_eq!(boxes.len(), 2);
		assert_eq!(boxes[0].as_tuple(), (-180.0, -0.703125, -89.296875, 90.0));
		assert_eq!(boxes[1].as_tuple(), (179.296875, -0.703125, 180.0, 90.0));
	}

	#[test]
	fn antimeridian_right() {
		let tile = TilePyramid::geodetic().tile(1, 1, 3).unwrap().with_pixelbuffer(2);
		let boxes = split_read_window(&tile);
		assert_eq!(boxes.len(), 2);
		assert_eq!(boxes[0].as_tuple(), (89.296875, -90.0, 180.0, 0.703125));
		assert_eq!(boxes[1].as_tuple(), (-180.0, -90.0, -179.296875, 0.703125));
	}

	#[rstest]
	#[case(TilePyramid::geodetic(), 0, 0, 0)]
	#[case(TilePyramid::geodetic(), 2, 0, 7)]
	#[case(TilePyramid::geodetic(), 2, 3, 0)]
	#[case(TilePyramid::mercator(), 1, 0, 1)]
	#[case(TilePyramid::mercator(), 3, 7, 0)]
	fn boxes_cover_the_clipped_window(
		#[case] pyramid: TilePyramid,
		#[case] zoom: u8,
		#[case] row: u32,
		#[case] col: u32,
	) {
		let tile = pyramid.tile(zoom, row, col).unwrap().with_pixelbuffer(16);
		let bounds = pyramid.bounds();
		let boxes = split_read_window(&tile);

		for b in &boxes {
			assert!(bounds.contains(b), "{b:?} leaves the pyramid");
		}
		for (i, a) in boxes.iter().enumerate() {
			for b in &boxes[i + 1..] {
				assert!(a.intersection(b).is_none(), "{a:?} overlaps {b:?}");
			}
		}

		// the buffered window has the same area as its parts, minus what lies beyond the poles
		let buffered = tile.buffered_bounds();
		let vertical = buffered.top.min(bounds.top) - buffered.bottom.max(bounds.bottom);
		assert_relative_eq!(area(&boxes), buffered.width() * vertical, max_relative = 1e-9);
	}
}
