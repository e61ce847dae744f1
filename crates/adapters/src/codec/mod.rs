use std::fs;
use std::path::Path;

use image::{ExtendedColorType, ImageError, ImageFormat, ImageReader};
use lite_upscale_application::{ApplicationError, RasterExporter, RasterLoader};
use lite_upscale_domain::{RasterImage, RGBA_CHANNELS};

#[derive(Debug, Default)]
pub struct ImageFileCodec;

impl RasterLoader for ImageFileCodec {
    fn load(&self, path: &Path) -> Result<RasterImage, ApplicationError> {
        let image = ImageReader::open(path)
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .decode()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(RasterImage::from_rgba(width, height, rgba.into_raw())?)
    }
}

impl RasterExporter for ImageFileCodec {
    fn export(&self, image: &RasterImage, path: &Path) -> Result<(), ApplicationError> {
        let format = ImageFormat::from_path(path).map_err(|error| {
            ApplicationError::InvalidInput(format!("cannot export to {}: {error}", path.display()))
        })?;

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| ApplicationError::Io(error.to_string()))?;
        }

        let saved = if format == ImageFormat::Jpeg {
            let rgb: Vec<u8> = image
                .as_bytes()
                .chunks_exact(RGBA_CHANNELS)
                .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
                .collect();
            image::save_buffer_with_format(path, &rgb, image.width(), image.height(), ExtendedColorType::Rgb8, format)
        } else {
            image::save_buffer_with_format(
                path,
                image.as_bytes(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
                format,
            )
        };
        saved.map_err(encode_error)
    }
}

fn encode_error(error: ImageError) -> ApplicationError {
    match error {
        ImageError::IoError(error) => ApplicationError::Io(error.to_string()),
        other => ApplicationError::Encode(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn loads_any_decodable_file_as_rgba() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("source.png");
        let img = ImageBuffer::from_fn(50, 30, |_x, _y| Rgb([10_u8, 20_u8, 30_u8]));
        img.save(&path).expect("save");

        let raster = ImageFileCodec.load(&path).expect("load");

        assert_eq!(raster.width(), 50);
        assert_eq!(raster.height(), 30);
        assert_eq!(raster.pixel(0, 0), Some([10, 20, 30, 255]));
    }

    #[test]
    fn exports_png_and_jpeg_creating_directories() {
        let dir = TempDir::new().expect("tempdir");
        let raster = RasterImage::filled(12, 8, [40, 80, 120, 255]).expect("raster");

        let png = dir.path().join("out/nested/full.png");
        let jpeg = dir.path().join("out/preview.jpg");
        ImageFileCodec.export(&raster, &png).expect("png export");
        ImageFileCodec.export(&raster, &jpeg).expect("jpeg export");

        let reloaded = ImageFileCodec.load(&png).expect("reload png");
        assert_eq!(reloaded.pixel(11, 7), Some([40, 80, 120, 255]));
        let reloaded = ImageFileCodec.load(&jpeg).expect("reload jpeg");
        assert_eq!((reloaded.width(), reloaded.height()), (12, 8));
    }

    #[test]
    fn png_export_keeps_alpha() {
        let dir = TempDir::new().expect("tempdir");
        let raster = RasterImage::filled(3, 3, [200, 10, 10, 90]).expect("raster");
        let path = dir.path().join("translucent.png");

        ImageFileCodec.export(&raster, &path).expect("export");

        let reloaded = ImageFileCodec.load(&path).expect("reload");
        assert_eq!(reloaded.pixel(1, 1), Some([200, 10, 10, 90]));
    }

    #[test]
    fn encoder_rejecting_the_layout_is_an_encode_error() {
        let dir = TempDir::new().expect("tempdir");
        let raster = RasterImage::filled(2, 2, [0, 0, 0, 255]).expect("raster");

        // OpenEXR only encodes float samples.
        let result = ImageFileCodec.export(&raster, &dir.path().join("out.exr"));

        assert!(matches!(result, Err(ApplicationError::Encode(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().expect("tempdir");
        let result = ImageFileCodec.load(&dir.path().join("absent.png"));
        assert!(matches!(result, Err(ApplicationError::Io(_))));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let raster = RasterImage::filled(2, 2, [0, 0, 0, 255]).expect("raster");
        let result = ImageFileCodec.export(&raster, &dir.path().join("out.unknownext"));
        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
    }
}
