use arcstr::ArcStr;

/// What the host build knows about a chunk when it reaches the render-chunk stage.
#[derive(Debug, Clone)]
pub struct RenderedChunk {
  /// Output file name relative to the output directory, e.g. `chunks/shared-abc.js`.
  pub file_name: ArcStr,
}

#[derive(Debug, Clone)]
pub struct RenderChunkArgs {
  pub code: ArcStr,
  pub chunk: RenderedChunk,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderChunkOutput {
  pub code: String,
  /// Serialized source map, present when the build asked for one.
  pub map: Option<String>,
}
