use mirror_detector::image::RgbImageU8;

/// Paints a gray square and its horizontal mirror image, keeping the buffer
/// perfectly symmetric under x -> width-1-x.
fn paint_mirrored_square(
    data: &mut [u8],
    width: usize,
    x0: usize,
    y0: usize,
    side: usize,
    shade: u8,
) {
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            for (px, py) in [(x, y), (width - 1 - x, y)] {
                let base = (py * width + px) * 3;
                data[base] = shade;
                data[base + 1] = shade;
                data[base + 2] = shade;
            }
        }
    }
}

/// Generates a perfectly left-right symmetric image: dark squares scattered
/// over the left half, each mirrored onto the right half.
///
/// Sizes and shades vary so corner descriptors and responses de-alias across
/// squares; every square is large enough that its four corners survive
/// non-maximum suppression independently.
pub fn mirrored_squares_rgb(width: usize, height: usize) -> RgbImageU8 {
    assert!(width >= 512 && height >= 384, "squares assume a 512x384 canvas");

    let mut data = vec![255u8; width * height * 3];
    let squares: [(usize, usize, usize, u8); 6] = [
        (60, 60, 12, 0),
        (140, 150, 13, 40),
        (80, 240, 14, 20),
        (180, 260, 16, 70),
        (150, 40, 18, 10),
        (100, 320, 20, 55),
    ];
    for (x0, y0, side, shade) in squares {
        paint_mirrored_square(&mut data, width, x0, y0, side, shade);
    }
    RgbImageU8::new(width, height, data)
}

/// Uniform featureless image; no extractor should find keypoints here.
pub fn blank_rgb(width: usize, height: usize) -> RgbImageU8 {
    RgbImageU8::new(width, height, vec![230u8; width * height * 3])
}
