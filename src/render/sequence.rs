use std::path::PathBuf;

use rayon::prelude::*;

use crate::{
    driver::FrameClock,
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{StarfieldError, StarfieldResult},
    render::raster::{FrameRGBA, rasterize_frame},
    render::svg::SvgOpts,
    surface::RenderSurface,
};

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in playback order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order within the
/// requested range, whether or not frames were rendered in parallel.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> StarfieldResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StarfieldResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> StarfieldResult<()>;
}

/// Keeps every rendered frame in memory, keyed by its frame index.
///
/// Useful for previews and for comparing serial and parallel renders of the same surface.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas size and fps of the last sequence, once it has begun.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Frames of the last sequence, in the order they arrived.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// The frame rendered for `idx`, if it was part of the last sequence.
    pub fn frame(&self, idx: FrameIndex) -> Option<&FrameRGBA> {
        self.frames
            .binary_search_by_key(&idx, |(i, _)| *i)
            .ok()
            .map(|pos| &self.frames[pos].1)
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> StarfieldResult<()> {
        self.frames.clear();
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StarfieldResult<()> {
        if let Some((last, _)) = self.frames.last()
            && *last >= idx
        {
            return Err(StarfieldError::render(format!(
                "frame {} arrived after frame {}",
                idx.0, last.0
            )));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> StarfieldResult<()> {
        Ok(())
    }
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> StarfieldResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            StarfieldError::render(format!("create output dir '{}': {e}", self.dir.display()))
        })?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StarfieldResult<()> {
        let path = self.frame_path(idx);
        frame.save_png(&path)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> StarfieldResult<()> {
        tracing::info!(
            frames = self.written.len(),
            dir = %self.dir.display(),
            "png sequence written"
        );
        Ok(())
    }
}

/// Options controlling [`render_range`].
#[derive(Clone, Debug)]
pub struct SequenceOpts {
    /// Render frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Frames rendered per batch before being handed to the sink.
    pub chunk_size: usize,
    pub svg: SvgOpts,
}

impl Default for SequenceOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            chunk_size: 32,
            svg: SvgOpts::default(),
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames rendered and pushed to the sink.
    pub frames_rendered: u64,
}

/// Render every frame of `range` at `fps` and push them to `sink` in order.
#[tracing::instrument(skip(surface, opts, sink), fields(start = range.start.0, end = range.end.0))]
pub fn render_range(
    surface: &RenderSurface,
    range: FrameRange,
    fps: Fps,
    opts: &SequenceOpts,
    sink: &mut dyn FrameSink,
) -> StarfieldResult<RenderStats> {
    if opts.chunk_size == 0 {
        return Err(StarfieldError::validation(
            "sequence chunk_size must be >= 1",
        ));
    }
    let pool = if opts.parallel {
        Some(frame_pool(opts.threads)?)
    } else {
        None
    };

    let canvas = surface.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps,
    })?;

    let render_one =
        |(idx, elapsed): (FrameIndex, f64)| -> StarfieldResult<(FrameIndex, FrameRGBA)> {
            let frame = rasterize_frame(&surface.sample(elapsed), &opts.svg)?;
            Ok((idx, frame))
        };

    let mut clock = FrameClock::new(fps, range);
    let mut stats = RenderStats {
        frames_total: range.len_frames(),
        frames_rendered: 0,
    };

    loop {
        let chunk: Vec<(FrameIndex, f64)> = clock.by_ref().take(opts.chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        let rendered: Vec<StarfieldResult<(FrameIndex, FrameRGBA)>> = match &pool {
            // Indexed parallel collect keeps the chunk's frame order.
            Some(pool) => pool.install(|| chunk.par_iter().copied().map(&render_one).collect()),
            None => chunk.iter().copied().map(&render_one).collect(),
        };
        for r in rendered {
            let (idx, frame) = r?;
            sink.push_frame(idx, &frame)?;
            stats.frames_rendered += 1;
        }
        tracing::debug!(
            done = stats.frames_rendered,
            total = stats.frames_total,
            "chunk rendered"
        );
    }

    sink.end()?;
    Ok(stats)
}

/// Worker pool for one sequence render, sized by `SequenceOpts::threads`.
fn frame_pool(threads: Option<usize>) -> StarfieldResult<rayon::ThreadPool> {
    let builder = match threads {
        Some(0) => {
            return Err(StarfieldError::validation(
                "sequence threads must be >= 1 when set",
            ));
        }
        Some(n) => rayon::ThreadPoolBuilder::new().num_threads(n),
        None => rayon::ThreadPoolBuilder::new(),
    };
    builder
        .thread_name(|i| format!("starfield-frame-{i}"))
        .build()
        .map_err(|e| StarfieldError::render(format!("start frame worker pool: {e}")))
}
