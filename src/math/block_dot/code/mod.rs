//! Block dot product implementations.
//!
//! `C = A * B` where A is `ROWS x n` stored row-major and B is `n x COLS`
//! stored column-major, so that every row of A and every column of B is a
//! contiguous slice. Each of the `ROWS * COLS` cells is one dot product,
//! computed by a vector kernel from [`crate::math::dot_product`].

use crate::error::KernelError;
use crate::math::dot_product::code::{self as dot, DotKernel};
use crate::math::KernelContext;
use crate::utils::VariantInfo;
use std::sync::Arc;

/// Rows of A and of the result
pub const ROWS: usize = 8;
/// Columns of B and of the result
pub const COLS: usize = 4;
/// Cells of the result block
pub const CELLS: usize = ROWS * COLS;

/// Left and right operands of a block dot product.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockOperands {
    len: usize,
    a: Vec<f64>,
    b: Vec<f64>,
}

impl BlockOperands {
    /// Operands filled with the benchmark pattern:
    /// `a[j,i] = 1000(i+1) + (j+1)`, `b[k,i] = 1 / (1000(i+1) + (k+1))`.
    pub fn new(len: usize) -> Self {
        let mut a = vec![0.0; ROWS * len];
        let mut b = vec![0.0; COLS * len];
        for i in 0..len {
            let base = 1000.0 * (i + 1) as f64;
            for j in 0..ROWS {
                a[j * len + i] = base + (j + 1) as f64;
            }
            for k in 0..COLS {
                b[k * len + i] = 1.0 / (base + (k + 1) as f64);
            }
        }
        Self { len, a, b }
    }

    /// Operands from existing buffers.
    ///
    /// # Panics
    /// Panics unless `a` holds `ROWS * len` and `b` holds `COLS * len` values.
    pub fn from_parts(len: usize, a: Vec<f64>, b: Vec<f64>) -> Self {
        assert_eq!(a.len(), ROWS * len, "A: expected {}x{} elements", ROWS, len);
        assert_eq!(b.len(), COLS * len, "B: expected {}x{} elements", len, COLS);
        Self { len, a, b }
    }

    /// Length of every row / column (the inner dimension `n`).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Row `j` of A.
    pub fn a_row(&self, j: usize) -> &[f64] {
        &self.a[j * self.len..(j + 1) * self.len]
    }

    /// Column `k` of B.
    pub fn b_col(&self, k: usize) -> &[f64] {
        &self.b[k * self.len..(k + 1) * self.len]
    }
}

/// Order in which the result cells are visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Rows of A in the outer loop
    RowMajor,
    /// Columns of B in the outer loop
    ColumnMajor,
}

/// Fill `c` (row-major, `ROWS x COLS`) with one `dot` call per cell.
///
/// # Errors
/// Returns the first error reported by `dot`; cells after it are left as they were.
///
/// # Panics
/// Panics if `c` does not hold [`CELLS`] values.
pub fn block_dot<F>(
    operands: &BlockOperands,
    c: &mut [f64],
    order: Traversal,
    dot: F,
) -> Result<(), KernelError>
where
    F: Fn(&[f64], &[f64]) -> Result<f64, KernelError>,
{
    assert_eq!(c.len(), CELLS, "C: expected {}x{} elements", ROWS, COLS);

    match order {
        Traversal::RowMajor => {
            for j in 0..ROWS {
                for k in 0..COLS {
                    c[j * COLS + k] = dot(operands.a_row(j), operands.b_col(k))?;
                }
            }
        }
        Traversal::ColumnMajor => {
            for k in 0..COLS {
                for j in 0..ROWS {
                    c[j * COLS + k] = dot(operands.a_row(j), operands.b_col(k))?;
                }
            }
        }
    }

    Ok(())
}

/// A block kernel: fills the result block from the operands.
pub type BlockKernel =
    Arc<dyn Fn(&BlockOperands, &mut [f64]) -> Result<(), KernelError> + Send + Sync>;

/// Name of the reference variant
pub const REFERENCE_VARIANT: &str = dot::REFERENCE_VARIANT;

/// (block variant name, vector kernel it wraps, traversal)
const COMPOSITIONS: [(&str, &str, Traversal); 8] = [
    (REFERENCE_VARIANT, dot::REFERENCE_VARIANT, Traversal::RowMajor),
    ("strided", "strided", Traversal::RowMajor),
    ("chunked", "chunked", Traversal::RowMajor),
    ("reduction", "reduction", Traversal::RowMajor),
    ("strided_simd", "strided_simd", Traversal::RowMajor),
    ("chunked_simd", "chunked_simd", Traversal::RowMajor),
    ("reduction_simd", "reduction_simd", Traversal::RowMajor),
    ("reduction_simd_reordered", "reduction_simd", Traversal::ColumnMajor),
];

fn compose(
    name: &'static str,
    inner: &VariantInfo<DotKernel>,
    order: Traversal,
) -> VariantInfo<BlockKernel> {
    let kernel = Arc::clone(&inner.function);
    let function: BlockKernel = Arc::new(move |operands: &BlockOperands, c: &mut [f64]| {
        block_dot(operands, c, order, |a, b| kernel(a, b))
    });

    VariantInfo {
        name,
        description: match order {
            Traversal::RowMajor => inner.description,
            Traversal::ColumnMajor => "Reduction with lane blocks, columns of B in the outer loop",
        },
        parallel: inner.parallel,
        function,
    }
}

/// Get all block variants, in the order the driver runs them.
pub fn available_variants(ctx: &KernelContext) -> Vec<VariantInfo<BlockKernel>> {
    let inner = dot::available_variants(ctx);

    COMPOSITIONS
        .iter()
        .filter_map(|&(name, dot_name, order)| {
            let found = inner.iter().find(|v| v.name == dot_name);
            if found.is_none() {
                log::warn!("block variant {} has no vector kernel {}", name, dot_name);
            }
            found.map(|v| compose(name, v, order))
        })
        .collect()
}
