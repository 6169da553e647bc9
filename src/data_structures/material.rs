/// Unlit, flat-coloured surface description.
///
/// `wireframe` records that the triangle edges are drawn as lines. The
/// renderer only has a line path, so every material is drawn that way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasicMaterial {
    /// 0xRRGGBB
    pub colour: u32,
    pub wireframe: bool,
}

impl BasicMaterial {
    pub fn wireframe(colour: u32) -> Self {
        Self {
            colour,
            wireframe: true,
        }
    }

    /// Colour as linear RGBA floats for the shader uniform.
    pub fn rgba(&self) -> [f32; 4] {
        let channel = |shift: u32| ((self.colour >> shift) & 0xff) as f32 / 255.0;
        [channel(16), channel(8), channel(0), 1.0]
    }
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self::wireframe(0xff0000)
    }
}
