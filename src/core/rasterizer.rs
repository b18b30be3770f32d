//! # 扫描线光栅化
//!
//! 把一个屏幕空间三角形按 y 排序后拆成上下两个梯形，逐行求左右边界，
//! 在边界之间线性插值 (u/z, v/z, 1/z)，再用插值得到的 1/z 还原透视正确的 (u, v)。

use crate::core::frame_buffer::FrameBuffer;
use crate::geometry::triangle::TexturedTriangle;
use crate::geometry::vector::Vector3H;
use crate::materials::texture::Texture;

/// 扫描线端点上需要插值的量：屏幕 x 以及 (u/z, v/z, 1/z)
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    x: f32,
    u: f32,
    v: f32,
    w: f32,
}

impl Span {
    #[inline]
    fn lerp(a: Span, b: Span, t: f32) -> Span {
        Span {
            x: a.x + (b.x - a.x) * t,
            u: a.u + (b.u - a.u) * t,
            v: a.v + (b.v - a.v) * t,
            w: a.w + (b.w - a.w) * t,
        }
    }
}

/// 光栅化用的顶点：行号取整，其余属性保持浮点
#[derive(Debug, Clone, Copy)]
struct RasterVertex {
    row: i32,
    span: Span,
}

impl RasterVertex {
    fn new(screen: Vector3H, texcoord: Vector3H) -> Self {
        Self {
            row: screen.y.round() as i32,
            span: Span {
                x: screen.x,
                u: texcoord.x,
                v: texcoord.y,
                w: texcoord.z,
            },
        }
    }
}

/// 一条从 `start` 到 `end` 的三角形边
#[derive(Debug, Clone, Copy)]
struct Edge {
    start: RasterVertex,
    end: RasterVertex,
}

impl Edge {
    fn new(start: RasterVertex, end: RasterVertex) -> Self {
        Self { start, end }
    }

    /// 第 `row` 行与边的交点；调用方保证边的纵向跨度不为零
    #[inline]
    fn at(&self, row: i32) -> Span {
        let dy = (self.end.row - self.start.row) as f32;
        let t = ((row - self.start.row) as f32 / dy).clamp(0.0, 1.0);
        Span::lerp(self.start.span, self.end.span, t)
    }
}

/// 填充一个已投影、已按屏幕边界裁剪的三角形，返回写入的像素数
///
/// `triangle.geometry` 为屏幕坐标，`triangle.texcoords` 为 (u/z, v/z, 1/z)。
pub fn fill(triangle: &TexturedTriangle, texture: &Texture, frame_buffer: &mut FrameBuffer) -> usize {
    let g = &triangle.geometry.vertices;
    let t = &triangle.texcoords.vertices;

    let mut vertices = [
        RasterVertex::new(g[0], t[0]),
        RasterVertex::new(g[1], t[1]),
        RasterVertex::new(g[2], t[2]),
    ];
    vertices.sort_by_key(|v| v.row);
    let [top, middle, bottom] = vertices;

    let long_edge = Edge::new(top, bottom);
    let mut written = 0;

    // 上半部分：top..middle
    if middle.row > top.row {
        written += fill_rows(
            Edge::new(top, middle),
            long_edge,
            top.row,
            middle.row,
            texture,
            frame_buffer,
        );
    }

    // 下半部分：middle..bottom
    if bottom.row > middle.row {
        written += fill_rows(
            Edge::new(middle, bottom),
            long_edge,
            middle.row,
            bottom.row,
            texture,
            frame_buffer,
        );
    }

    written
}

fn fill_rows(
    short_edge: Edge,
    long_edge: Edge,
    first_row: i32,
    last_row: i32,
    texture: &Texture,
    frame_buffer: &mut FrameBuffer,
) -> usize {
    let max_row = frame_buffer.height as i32 - 1;
    let mut written = 0;

    for row in first_row.max(0)..=last_row.min(max_row) {
        let mut left = short_edge.at(row);
        let mut right = long_edge.at(row);
        if left.x > right.x {
            std::mem::swap(&mut left, &mut right);
        }
        written += fill_span(row as usize, left, right, texture, frame_buffer);
    }

    written
}

#[inline]
fn fill_span(
    row: usize,
    left: Span,
    right: Span,
    texture: &Texture,
    frame_buffer: &mut FrameBuffer,
) -> usize {
    let max_col = frame_buffer.width as i32 - 1;
    let first_col = (left.x.round() as i32).max(0);
    let last_col = (right.x.round() as i32).min(max_col);
    let width = right.x - left.x;
    let row_start = row * frame_buffer.width;
    let mut written = 0;

    for col in first_col..=last_col {
        let t = if width > f32::EPSILON {
            ((col as f32 - left.x) / width).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let pixel = Span::lerp(left, right, t);
        let index = row_start + col as usize;

        if pixel.w > 0.0 && frame_buffer.passes_depth_test(index, pixel.w) {
            let u = pixel.u / pixel.w;
            let v = pixel.v / pixel.w;
            frame_buffer.write(index, pixel.w, texture.sample(u, v));
            written += 1;
        }
    }

    written
}
