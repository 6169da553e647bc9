use wire_cube::CubeConfig;

fn main() -> anyhow::Result<()> {
    wire_cube::run(CubeConfig::default())
}
