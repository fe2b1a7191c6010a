use crate::MAX_BLOCK_SIZE;

/*
Planar Audio Blocks
===================

An AudioBuffer is one block of audio for every channel, stored channel-major
("planar"): all frames of channel 0, then all frames of channel 1, and so on.

    frames = 4, channels = 2

    data: [ L0 L1 L2 L3 | R0 R1 R2 R3 ]
            channel 0     channel 1

    index(channel, frame) = channel * frames + frame

Audio devices usually want the opposite, interleaved layout
([L0 R0 L1 R1 ...]); `write_interleaved` converts at the edge of the graph.

Realtime Safety
---------------

Storage for `channels * MAX_BLOCK_SIZE` samples is allocated once, up front.
Changing the block size afterwards only moves the `frames` marker, so the
audio thread never allocates. Changing `frames` also changes the channel
stride, so the contents are meaningless until the next `clear`.
*/

#[derive(Debug, Clone)]
pub struct AudioBuffer {
    data: Vec<f32>,
    channels: usize,
    frames: usize,
}

impl AudioBuffer {
    /// Allocate a buffer able to hold `MAX_BLOCK_SIZE` frames of `channels`.
    pub fn new(channels: usize) -> Self {
        let channels = channels.max(1);
        Self {
            data: vec![0.0; channels * MAX_BLOCK_SIZE],
            channels,
            frames: MAX_BLOCK_SIZE,
        }
    }

    /// Allocate a buffer and set its block size in one go.
    pub fn with_frames(channels: usize, frames: usize) -> Self {
        let mut buffer = Self::new(channels);
        buffer.set_frames(frames);
        buffer
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Set the number of valid frames, clamped to `MAX_BLOCK_SIZE`.
    pub fn set_frames(&mut self, frames: usize) {
        self.frames = frames.min(MAX_BLOCK_SIZE);
    }

    /// Zero every valid sample.
    pub fn clear(&mut self) {
        self.data_mut().fill(0.0);
    }

    /// All valid samples, channel-major.
    pub fn data(&self) -> &[f32] {
        &self.data[..self.channels * self.frames]
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        let len = self.channels * self.frames;
        &mut self.data[..len]
    }

    pub fn channel(&self, channel: usize) -> &[f32] {
        let start = channel * self.frames;
        &self.data[start..start + self.frames]
    }

    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        let start = channel * self.frames;
        let end = start + self.frames;
        &mut self.data[start..end]
    }

    /// Write the same value to `frame` on every channel.
    #[inline]
    pub fn set_frame(&mut self, frame: usize, value: f32) {
        for channel in 0..self.channels {
            self.data[channel * self.frames + frame] = value;
        }
    }

    /// Copy this block into an interleaved device buffer.
    ///
    /// `out` must hold `frames * out_channels` samples. Extra device channels
    /// repeat the last buffer channel; surplus buffer channels are dropped.
    pub fn write_interleaved(&self, out: &mut [f32], out_channels: usize) {
        for (frame, slot) in out
            .chunks_exact_mut(out_channels)
            .take(self.frames)
            .enumerate()
        {
            for (ch, sample) in slot.iter_mut().enumerate() {
                let src = ch.min(self.channels - 1);
                *sample = self.data[src * self.frames + frame];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_layout_follows_frame_count() {
        let mut buffer = AudioBuffer::with_frames(2, 4);
        buffer.channel_mut(0).copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        buffer.channel_mut(1).copy_from_slice(&[5.0, 6.0, 7.0, 8.0]);

        assert_eq!(buffer.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn frames_are_clamped_to_capacity() {
        let buffer = AudioBuffer::with_frames(1, MAX_BLOCK_SIZE * 4);
        assert_eq!(buffer.frames(), MAX_BLOCK_SIZE);
    }

    #[test]
    fn set_frame_fans_out_to_every_channel() {
        let mut buffer = AudioBuffer::with_frames(3, 8);
        buffer.clear();
        buffer.set_frame(5, 0.25);
        for ch in 0..3 {
            assert_eq!(buffer.channel(ch)[5], 0.25);
            assert_eq!(buffer.channel(ch)[4], 0.0);
        }
    }

    #[test]
    fn interleaves_for_devices() {
        let mut buffer = AudioBuffer::with_frames(2, 3);
        buffer.channel_mut(0).copy_from_slice(&[1.0, 2.0, 3.0]);
        buffer.channel_mut(1).copy_from_slice(&[-1.0, -2.0, -3.0]);

        let mut stereo = vec![0.0; 6];
        buffer.write_interleaved(&mut stereo, 2);
        assert_eq!(stereo, vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);

        // Quad device: channels 2 and 3 repeat the right channel
        let mut quad = vec![0.0; 12];
        buffer.write_interleaved(&mut quad, 4);
        assert_eq!(&quad[..4], &[1.0, -1.0, -1.0, -1.0]);
    }
}
